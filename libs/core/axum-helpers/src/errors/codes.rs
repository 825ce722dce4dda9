//! Type-safe error codes for API responses.
//!
//! Each error code includes:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Requested resource was not found
    NotFound,

    /// HTTP method not supported by the route
    MethodNotAllowed,

    /// JSON extraction from request body failed
    JsonExtraction,

    // Embedding errors (6000s)
    /// The model failed or returned a malformed result
    InferenceFailed,

    /// The model is not loaded or misconfigured
    ModelUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InferenceFailed => "INFERENCE_FAILED",
            Self::ModelUnavailable => "MODEL_UNAVAILABLE",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            // Client errors (1000-1999)
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::MethodNotAllowed => 1012,

            // Embedding errors (6000s)
            Self::InferenceFailed => 6001,
            Self::ModelUnavailable => 6002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::NotFound => "Resource not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::JsonExtraction => "Failed to parse request body",
            Self::InferenceFailed => "Embedding inference failed",
            Self::ModelUnavailable => "Embedding model is unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::InferenceFailed.as_str(), "INFERENCE_FAILED");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::MethodNotAllowed.code(), 1012);
        assert_eq!(ErrorCode::InferenceFailed.code(), 6001);
    }

    #[test]
    fn test_error_code_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::ModelUnavailable).unwrap();
        assert_eq!(json, "\"MODEL_UNAVAILABLE\"");
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ErrorCode::JsonExtraction.to_string(), "JSON_EXTRACTION");
    }
}
