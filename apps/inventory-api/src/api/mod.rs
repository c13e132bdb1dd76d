//! API routes module
//!
//! This module defines all HTTP API routes for the Inventory API.

pub mod health;

use axum::Router;
use domain_inventory::{InventoryRepository, InventoryService, handlers};

use crate::state::AppState;

/// Create all API routes over the chosen repository
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes<R: InventoryRepository + 'static>(repository: R, state: &AppState) -> Router {
    let service = InventoryService::new(repository);

    Router::new()
        .merge(handlers::router(service))
        .merge(health::router(state.clone()))
}
