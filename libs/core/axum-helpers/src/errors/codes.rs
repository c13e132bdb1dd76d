//! Error codes carried by every [`ErrorResponse`](super::ErrorResponse).
//!
//! A code has a wire identifier (`"NOT_FOUND"`), a numeric code for log
//! searches (`1004`) and a fallback message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
//! assert_eq!(ErrorCode::NotFound.code(), 1004);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    /// Body was not valid JSON or did not match the expected shape
    JsonExtraction,
    NotFound,
    /// Rejected by a domain rule, e.g. a duplicate SKU
    BadRequest,
    InternalError,
    DatabaseError,
}

impl ErrorCode {
    /// Wire identifier, numeric code and fallback message.
    ///
    /// Numeric ranges: 1xxx request and generic errors, 2xxx storage.
    const fn parts(self) -> (&'static str, i32, &'static str) {
        match self {
            Self::ValidationError => ("VALIDATION_ERROR", 1001, "Request validation failed"),
            Self::InvalidUuid => ("INVALID_UUID", 1002, "Invalid UUID format"),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => ("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => ("INTERNAL_ERROR", 1005, "An internal server error occurred"),
            Self::BadRequest => ("BAD_REQUEST", 1012, "Bad request"),
            Self::DatabaseError => ("DATABASE_ERROR", 2003, "Database error occurred"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.parts().0
    }

    pub fn code(&self) -> i32 {
        self.parts().1
    }

    pub fn default_message(&self) -> &'static str {
        self.parts().2
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
