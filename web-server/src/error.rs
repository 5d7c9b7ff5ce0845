//! Error handling

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use anomalia_core::{ClassifyError, ModelError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    ValidationError(String),

    #[error("Could not read CSV: {0}")]
    InvalidCsv(String),

    // Model errors
    #[error("Model file not found. Place the model at {0}")]
    ModelNotFound(String),

    #[error("Model error: {0}")]
    ModelError(ModelError),

    // Classification errors
    #[error("Classification error: {0}")]
    Classification(#[from] ClassifyError),

    // Generic errors
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCsv(_) => StatusCode::BAD_REQUEST,
            AppError::ModelNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ModelError(msg) => {
                tracing::error!("Model error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Classification(err) if err.is_input_error() => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Classification(err) => {
                tracing::error!("Classification failed: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let mut body = json!({
            "error": self.to_string(),
            "status": status.as_u16()
        });
        if let AppError::Classification(err) = &self {
            body["kind"] = json!(err.kind());
        }

        (status, Json(body)).into_response()
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound(path) => AppError::ModelNotFound(path),
            ModelError::UnsupportedInterface => {
                AppError::Classification(ClassifyError::UnsupportedModelInterface)
            }
            other => AppError::ModelError(other),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::ValidationError(format!("Invalid upload: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Classification task failed: {}", err))
    }
}
