use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::RecommendError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Similarity strategy not fitted: {0}")]
    NotFitted(String),

    #[error("Catalog format error: {0}")]
    CatalogFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::NotFound(title) => {
                AppError::NotFound(format!("Title \"{}\" not found in our database", title))
            }
            RecommendError::NotFitted(msg) => AppError::NotFitted(msg),
            RecommendError::InvalidConfiguration(msg) => AppError::InvalidConfiguration(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) | AppError::InvalidConfiguration(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFitted(_)
            | AppError::CatalogFormat(_)
            | AppError::Csv(_)
            | AppError::Io(_)
            | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_error_conversion() {
        let err: AppError = RecommendError::NotFound("Heat".to_string()).into();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("Heat")));

        let err: AppError = RecommendError::InvalidConfiguration("bad".to_string()).into();
        assert!(matches!(err, AppError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidConfiguration("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFitted("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
