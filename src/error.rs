//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::ml::dataset::DatasetError;
use crate::ml::pipeline::TrainError;
use crate::ml::store::StoreError;
use crate::scrape::{ScrapeError, UnsupportedPlatform};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Training errors
    DatasetNotFound(String),
    SchemaError(String),
    TrainingFailed(String),

    // Prediction errors
    ModelNotTrained,
    BadArtifact(String),

    // Scan errors
    ScrapeUnavailable,
    UnsupportedPlatform(String),
    ScrapeFailure(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatasetNotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::SchemaError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ModelNotTrained => (
                StatusCode::BAD_REQUEST,
                "Model not trained. Call /train first.".to_string(),
            ),
            AppError::ScrapeUnavailable => (
                StatusCode::BAD_REQUEST,
                "Scraper not available on server".to_string(),
            ),
            AppError::UnsupportedPlatform(msg) | AppError::ScrapeFailure(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::BadArtifact(msg) => {
                tracing::error!("Model artifact error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::TrainingFailed(msg) => {
                tracing::error!("Training failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::MissingTargetColumn | DatasetError::UnknownLabel(_) => {
                AppError::SchemaError(err.to_string())
            }
            DatasetError::Io(_) | DatasetError::Csv(_) => {
                AppError::TrainingFailed(err.to_string())
            }
        }
    }
}

impl From<TrainError> for AppError {
    fn from(err: TrainError) -> Self {
        AppError::TrainingFailed(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::BadArtifact(err.to_string())
    }
}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        AppError::ScrapeFailure(err.to_string())
    }
}

impl From<UnsupportedPlatform> for AppError {
    fn from(err: UnsupportedPlatform) -> Self {
        AppError::UnsupportedPlatform(err.to_string())
    }
}
