//! Chunkdrop Client Library
//!
//! Helpers for exercising a running upload server:
//!
//! - `probe`: wait until the server answers the listing endpoint
//! - `generator`: write large test files without holding them in memory
//! - `uploader`: stream a file to the upload endpoint as multipart

pub mod error;
pub mod generator;
pub mod probe;
pub mod uploader;

pub use error::{ClientError, Result};

/// Join `path` onto a base URL, tolerating a trailing slash on the base
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
