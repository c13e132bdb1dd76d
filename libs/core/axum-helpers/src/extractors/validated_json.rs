//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Malformed bodies and failed `Validate` checks are both rejected with
/// 400 Bad Request; validation failures carry per-field details.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1))]
///     sku: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateProduct>) -> String {
///     format!("Creating {}", payload.sku)
/// }
///
/// let app = Router::new().route("/products", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Movement {
        #[validate(range(min = 1))]
        quantity: i64,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(m): ValidatedJson<Movement>| async move { m.quantity.to_string() }),
        )
    }

    fn request(body: &'static str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let response = app().oneshot(request(r#"{"quantity": 3}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_failed_validation_has_field_details() {
        let response = app().oneshot(request(r#"{"quantity": 0}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["quantity"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = app().oneshot(request(r#"{"quantity": "#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_bad_request() {
        let response = app().oneshot(request(r#"{"quantity": "many"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
