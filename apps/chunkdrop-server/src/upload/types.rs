//! Upload types

use serde::{Deserialize, Serialize};

// ============================================================================
// Request / Response Types
// ============================================================================

/// A single inbound upload: an untrusted filename plus a body that can be
/// read exactly once.
#[derive(Debug)]
pub struct UploadRequest<R> {
    /// Filename as supplied by the client, used verbatim on disk
    pub filename: String,

    /// Byte source for the file contents
    pub body: R,
}

impl<R> UploadRequest<R> {
    pub fn new(filename: impl Into<String>, body: R) -> Self {
        Self {
            filename: filename.into(),
            body,
        }
    }
}

/// Response after a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Filename the upload was stored under
    pub filename: String,

    /// Path of the stored file
    pub location: String,
}

// ============================================================================
// Error Types
// ============================================================================

/// Upload error types
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Extension is not in the whitelist. Carries the rejected filename.
    #[error("File type not allowed")]
    InvalidFileType(String),

    #[error("Error saving file: {0}")]
    StorageError(#[source] std::io::Error),

    #[error("{0}")]
    BadRequest(String),
}

impl UploadError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::InvalidFileType(_) => StatusCode::BAD_REQUEST,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Machine-readable error category
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFileType(_) => "INVALID_FILE_TYPE",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError(err)
    }
}
