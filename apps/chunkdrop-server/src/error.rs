//! Error types for the Chunkdrop server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upload::UploadError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to list upload directory: {0}")]
    Listing(#[source] std::io::Error),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            code: code.into(),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Upload failed: {}", self);
        }

        let body = Json(ErrorResponse::new(self.to_string(), self.code()));
        (status, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Listing(e) => {
                tracing::error!("Listing error: {}", e);
                let body = Json(ErrorResponse::new(
                    format!("Failed to list upload directory: {}", e),
                    "LISTING_ERROR",
                ));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::Upload(e) => e.into_response(),
        }
    }
}
