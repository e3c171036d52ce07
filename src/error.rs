use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{key} environment variable required but not set")]
    MissingConfig { key: String },

    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Database connection is not open")]
    NotConnected,

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection failed: {0}")]
    Connect(#[from] sea_orm::sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        // Every variant is a server-side failure; client input errors are
        // rejected by the extractors before a handler runs.
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(status = %status, "Request failed: {}", self);
        let message = status.canonical_reason().unwrap_or("Internal Server Error");
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_names_the_key() {
        let err = AppError::missing_config("DBHOST");
        assert_eq!(
            err.to_string(),
            "DBHOST environment variable required but not set"
        );
    }

    #[tokio::test]
    async fn test_database_error_renders_generic_500() {
        let detail = "relation \"users\" does not exist".to_string();
        let err = AppError::from(sea_orm::DbErr::Custom(detail));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }
}
