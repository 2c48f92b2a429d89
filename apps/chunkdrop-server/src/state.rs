//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::storage::UploadDirectory;
use crate::upload::{ChunkedUploadHandler, ExtensionValidator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    upload_dir: UploadDirectory,
    uploads: ChunkedUploadHandler,
}

impl AppState {
    /// Create a new application state
    ///
    /// Creates the upload directory if it does not exist yet.
    pub async fn new(config: &Config) -> std::io::Result<Self> {
        let upload_dir = UploadDirectory::init(&config.storage.upload_dir).await?;
        let validator = ExtensionValidator::new(config.storage.allowed_extensions.iter().cloned());
        let uploads =
            ChunkedUploadHandler::new(upload_dir.clone(), validator, config.storage.chunk_size);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                upload_dir,
                uploads,
            }),
        })
    }

    /// Get the upload directory
    pub fn upload_dir(&self) -> &UploadDirectory {
        &self.inner.upload_dir
    }

    /// Get the upload handler
    pub fn uploads(&self) -> &ChunkedUploadHandler {
        &self.inner.uploads
    }
}
