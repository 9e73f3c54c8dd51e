// Error types for the feed core and their conversion into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// Failure of a single data row; the parser skips the row and keeps going
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowError {
    #[error("Missing required field: name (row {row})")]
    MissingName { row: usize },
}

// Failure of a whole feed. Rendered into `FetchResult::error`, never returned
// across the core boundary as-is.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeedError {
    #[error("{var} is not configured")]
    NotConfigured { var: String },

    #[error("{0}")]
    Transport(String),

    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("CSV has no data rows")]
    NoDataRows,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Parsed CSV has no valid items")]
    NoValidItems,

    #[error("Fixture error: {0}")]
    Fixture(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(error: reqwest::Error) -> Self {
        FeedError::Transport(error.to_string())
    }
}

// Application error type for the HTTP surface
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    NotFound,
}

// Implement conversion from anyhow::Error for easier error propagation
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            // Debug-only endpoints answer an empty 404 when disabled
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_error_messages() {
        let e = FeedError::NotConfigured { var: "APP_VINOS_CSV_URL".to_string() };
        assert_eq!(e.to_string(), "APP_VINOS_CSV_URL is not configured");

        let e = FeedError::HttpStatus { status: 503, reason: "Service Unavailable".to_string() };
        assert_eq!(e.to_string(), "HTTP 503: Service Unavailable");

        let e = FeedError::MissingColumns(vec!["nombre".to_string(), "orden".to_string()]);
        assert_eq!(e.to_string(), "Missing required columns: nombre, orden");
    }

    #[test]
    fn not_found_has_empty_body() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let response = AppError::from(anyhow::anyhow!("db down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
