use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::page::PageError;
use crate::template::ShellLoadError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Shell template error: {0}")]
    Shell(#[from] ShellLoadError),

    #[error("Page rendering error: {0}")]
    Page(#[from] PageError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl AppError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Shell(_) => "shell",
            AppError::Page(e) => e.kind(),
            AppError::Metrics(_) => "metrics",
        }
    }
}

/// Fixed body returned for any server-side failure. Internal error detail
/// stays in the logs; it never reaches the response.
const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        // Always log the detailed error server-side
        tracing::error!(
            kind = %self.kind(),
            status = %status.as_u16(),
            error = %self,
            "Request failed"
        );

        (status, INTERNAL_ERROR_BODY).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
