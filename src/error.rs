use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Feature vector shape does not match what the scaler was fit on
    #[error("Model input error: expected {expected} features, got {actual}")]
    ModelInput { expected: usize, actual: usize },

    /// Classifier failed while evaluating a scaled vector
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Classifier produced a class outside the cover-type label table
    #[error("Unknown cover type class: {0}")]
    UnknownClass(i64),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Model artifact could not be read or is malformed
    #[error("Model artifact error ({}): {message}", path.display())]
    Artifact { path: PathBuf, message: String },
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ModelInput { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UnknownClass(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Artifact { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::ModelInput { .. } => "MODEL_INPUT_ERROR",
            AppError::Prediction(_) => "PREDICTION_ERROR",
            AppError::UnknownClass(_) => "UNKNOWN_CLASS_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Artifact { .. } => "ARTIFACT_ERROR",
        }
    }

    /// True for the three failures a prediction attempt can end in
    pub fn is_prediction_failure(&self) -> bool {
        matches!(
            self,
            AppError::ModelInput { .. } | AppError::Prediction(_) | AppError::UnknownClass(_)
        )
    }
}

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::error!(
            error_code = error_code,
            status_code = status.as_u16(),
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ModelInput {
                expected: 54,
                actual: 50
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Validation("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnknownClass(8).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Configuration("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Prediction("test".to_string()).error_code(),
            "PREDICTION_ERROR"
        );
        assert_eq!(AppError::UnknownClass(0).error_code(), "UNKNOWN_CLASS_ERROR");
        assert_eq!(
            AppError::Validation("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_prediction_failures() {
        assert!(AppError::UnknownClass(8).is_prediction_failure());
        assert!(AppError::Prediction("boom".to_string()).is_prediction_failure());
        assert!(!AppError::Validation("bad".to_string()).is_prediction_failure());
    }

    #[test]
    fn test_artifact_message_includes_path() {
        let err = AppError::Artifact {
            path: PathBuf::from("models/scaler.json"),
            message: "missing".to_string(),
        };
        assert!(err.to_string().contains("models/scaler.json"));
    }
}
