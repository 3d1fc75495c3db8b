use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("No items provided")]
    NoItems,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to decode stored record: {0}")]
    Decode(String),

    #[error("Failed to encode record: {0}")]
    Encode(String),
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Convert StorefrontError to AppError for standardized error responses
impl From<StorefrontError> for AppError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::NoItems => AppError::BadRequest(err.to_string()),
            StorefrontError::Validation(errors) => AppError::ValidationError(errors),
            StorefrontError::Database(msg) => AppError::Database(msg),
            StorefrontError::Decode(msg) => AppError::Database(msg),
            StorefrontError::Encode(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for StorefrontError {
    fn from(err: mongodb::error::Error) -> Self {
        StorefrontError::Database(err.to_string())
    }
}

impl From<bson::ser::Error> for StorefrontError {
    fn from(err: bson::ser::Error) -> Self {
        StorefrontError::Encode(err.to_string())
    }
}
