use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use std::str::FromStr;
use thiserror::Error;

/// Message returned for an empty single-text request on every protocol.
pub const EMPTY_TEXT: &str = "Text cannot be empty";
/// Message returned for an empty batch on every protocol.
pub const EMPTY_BATCH: &str = "Texts list cannot be empty";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbeddingError {
    /// Client-caused: empty text or empty batch.
    #[error("{0}")]
    Validation(String),

    #[error("Inference failed: {0}")]
    Internal(String),

    #[error("Model configuration error: {0}")]
    Config(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

impl EmbeddingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        EmbeddingError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        EmbeddingError::Internal(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EmbeddingError::Validation(_))
    }

    /// Canonical status name shared by the gRPC and GraphQL surfaces.
    pub fn status_code(&self) -> &'static str {
        match self {
            EmbeddingError::Validation(_) => "INVALID_ARGUMENT",
            EmbeddingError::Internal(_) => "INTERNAL",
            EmbeddingError::Config(_) => "FAILED_PRECONDITION",
        }
    }
}

impl From<EmbeddingError> for tonic::Status {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Validation(msg) => tonic::Status::invalid_argument(msg),
            EmbeddingError::Internal(msg) => tonic::Status::internal(msg),
            EmbeddingError::Config(msg) => {
                tonic::Status::failed_precondition(format!("Model configuration error: {msg}"))
            }
        }
    }
}

/// How REST responses map contract failures onto HTTP status codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RestErrorMode {
    /// Every failure is a 500, validation included.
    #[default]
    Collapsed,
    /// Validation failures are 400, everything else 500.
    Distinct,
}

impl RestErrorMode {
    pub fn to_app_error(self, err: EmbeddingError) -> AppError {
        match (self, err) {
            (RestErrorMode::Distinct, EmbeddingError::Validation(msg)) => AppError::BadRequest(msg),
            (RestErrorMode::Collapsed, EmbeddingError::Validation(message)) => AppError::Internal {
                code: ErrorCode::ValidationError,
                message,
            },
            (_, EmbeddingError::Internal(message)) => AppError::Internal {
                code: ErrorCode::InferenceFailed,
                message,
            },
            (_, EmbeddingError::Config(message)) => AppError::Internal {
                code: ErrorCode::ModelUnavailable,
                message,
            },
        }
    }
}

impl FromStr for RestErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collapsed" => Ok(RestErrorMode::Collapsed),
            "distinct" => Ok(RestErrorMode::Distinct),
            other => Err(format!(
                "unknown REST error mode '{other}', expected 'collapsed' or 'distinct'"
            )),
        }
    }
}

/// Convert EmbeddingError to AppError using the distinct 400/500 mapping
impl From<EmbeddingError> for AppError {
    fn from(err: EmbeddingError) -> Self {
        RestErrorMode::Distinct.to_app_error(err)
    }
}

impl IntoResponse for EmbeddingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_validation_maps_to_invalid_argument() {
        let status: tonic::Status = EmbeddingError::validation(EMPTY_TEXT).into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), EMPTY_TEXT);
    }

    #[test]
    fn test_internal_maps_to_internal() {
        let status: tonic::Status = EmbeddingError::internal("onnx exploded").into();
        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "onnx exploded");
    }

    #[test]
    fn test_config_maps_to_failed_precondition() {
        let status: tonic::Status = EmbeddingError::Config("no weights".into()).into();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
    }

    #[test]
    fn test_collapsed_mode_is_always_500() {
        let mode = RestErrorMode::Collapsed;
        let validation = mode.to_app_error(EmbeddingError::validation(EMPTY_TEXT));
        let internal = mode.to_app_error(EmbeddingError::internal("boom"));
        assert_eq!(validation.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_distinct_mode_splits_validation() {
        let mode = RestErrorMode::Distinct;
        let validation = mode.to_app_error(EmbeddingError::validation(EMPTY_BATCH));
        let internal = mode.to_app_error(EmbeddingError::internal("boom"));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_mode_parsing() {
        assert_eq!("collapsed".parse(), Ok(RestErrorMode::Collapsed));
        assert_eq!(" Distinct ".parse(), Ok(RestErrorMode::Distinct));
        assert!("strict".parse::<RestErrorMode>().is_err());
        assert_eq!(RestErrorMode::default(), RestErrorMode::Collapsed);
    }

    #[test]
    fn test_classification() {
        assert!(EmbeddingError::validation("x").is_validation());
        assert!(!EmbeddingError::internal("x").is_validation());
        assert_eq!(EmbeddingError::internal("x").status_code(), "INTERNAL");
        assert_eq!(
            EmbeddingError::validation("x").status_code(),
            "INVALID_ARGUMENT"
        );
    }
}
