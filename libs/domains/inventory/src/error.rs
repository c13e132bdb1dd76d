use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Product with SKU '{0}' already exists")]
    DuplicateSku(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Convert InventoryError to AppError for standardized error responses
impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            InventoryError::DuplicateSku(sku) => {
                AppError::BadRequest(format!("Product with SKU '{}' already exists", sku))
            }
            InventoryError::Validation(msg) => AppError::BadRequest(msg),
            InventoryError::Database(msg) => AppError::Database(msg),
            InventoryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for InventoryError {
    fn from(err: mongodb::error::Error) -> Self {
        // E11000: the unique sku index rejected the write
        if let mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
            ref write_error,
        )) = *err.kind
        {
            if write_error.code == 11000 {
                return InventoryError::Validation(format!(
                    "Duplicate key: {}",
                    write_error.message
                ));
            }
        }
        InventoryError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for InventoryError {
    fn from(err: validator::ValidationErrors) -> Self {
        InventoryError::Validation(err.to_string())
    }
}
