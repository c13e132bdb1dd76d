//! UUID path parameter extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Extractor for UUID path parameters.
///
/// Automatically parses and validates UUID from path parameters,
/// returning a proper error response if invalid.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::UuidPath;
///
/// async fn get_product(UuidPath(id): UuidPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match Uuid::parse_str(&id) {
            Ok(uuid) => Ok(UuidPath(uuid)),
            Err(_) => Err(AppError::BadRequest(format!("Invalid UUID: {}", id)).into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/{id}", get(|UuidPath(id): UuidPath| async move { id.to_string() }))
    }

    async fn status_for(path: &str) -> StatusCode {
        let request = axum::http::Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_valid_uuid() {
        assert_eq!(status_for(&format!("/{}", Uuid::now_v7())).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_uuid_is_bad_request() {
        assert_eq!(status_for("/not-a-uuid").await, StatusCode::BAD_REQUEST);
    }
}
