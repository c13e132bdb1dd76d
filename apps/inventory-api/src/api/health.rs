//! Health check endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageHealth {
    status: String,
    message: String,
    /// `mongodb` or `in-memory`
    storage_mode: String,
}

/// Create a health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Liveness check reporting the active storage backend
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = StorageHealth)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<StorageHealth> {
    Json(StorageHealth {
        status: "ok".to_string(),
        message: format!("{} is running", state.config.app.name),
        storage_mode: state.storage.to_string(),
    })
}

/// Readiness check; the in-memory backend is always ready
#[utoipa::path(
    get,
    path = "/api/ready",
    tag = "health",
    responses(
        (status = 200, description = "Storage backend is reachable"),
        (status = 503, description = "Storage backend is unreachable")
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let storage: HealthCheckFuture = match state.mongo_client {
        Some(client) => Box::pin(async move {
            database::mongodb::check_health(&client)
                .await
                .map_err(|e| e.to_string())
        }),
        None => Box::pin(async { Ok(()) }),
    };

    match run_health_checks(vec![("storage", storage)]).await {
        Ok(ready) => ready.into_response(),
        Err(unavailable) => unavailable.into_response(),
    }
}
