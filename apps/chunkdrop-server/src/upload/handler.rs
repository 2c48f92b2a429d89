//! Chunked Upload Handler
//!
//! Streams an upload body to disk one bounded chunk at a time:
//! 1. Check the extension whitelist (nothing is opened or read on rejection)
//! 2. Open the destination in the upload directory
//! 3. Read up to `chunk_size` bytes, write them, repeat until end of stream
//! 4. Close and report the size found on disk
//!
//! A failed read or write aborts the upload. Whatever was already written
//! stays on disk.

use tokio::io::{AsyncRead, AsyncReadExt};
use uuid::Uuid;

use crate::storage::{StorageSink, StoredFile, UploadDirectory};

use super::types::{UploadError, UploadRequest, UploadResponse};
use super::validator::ExtensionValidator;

/// Orchestrates validation and chunked writes for a single upload directory
#[derive(Debug, Clone)]
pub struct ChunkedUploadHandler {
    directory: UploadDirectory,
    validator: ExtensionValidator,
    chunk_size: usize,
}

impl ChunkedUploadHandler {
    /// `chunk_size` of zero is bumped to one byte so the read loop always
    /// makes progress.
    pub fn new(directory: UploadDirectory, validator: ExtensionValidator, chunk_size: usize) -> Self {
        Self {
            directory,
            validator,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub async fn handle_upload<R>(
        &self,
        request: UploadRequest<R>,
    ) -> Result<UploadResponse, UploadError>
    where
        R: AsyncRead + Unpin,
    {
        let UploadRequest { filename, body } = request;

        if !self.validator.is_allowed(&filename) {
            tracing::info!(filename = %filename, "Rejected upload with disallowed extension");
            return Err(UploadError::InvalidFileType(filename));
        }

        let upload_id = Uuid::new_v4();
        tracing::info!(
            upload_id = %upload_id,
            filename = %filename,
            chunk_size = self.chunk_size,
            "Starting upload"
        );

        let mut sink = self.directory.open_for_write(&filename).await.map_err(|e| {
            tracing::error!(upload_id = %upload_id, filename = %filename, error = %e, "Failed to open destination");
            UploadError::StorageError(e)
        })?;

        if let Err(e) = self.stream_chunks(upload_id, body, &mut sink).await {
            tracing::error!(
                upload_id = %upload_id,
                filename = %filename,
                bytes_written = sink.bytes_written(),
                error = %e,
                "Upload aborted, partial file left in place"
            );
            sink.abort().await;
            return Err(UploadError::StorageError(e));
        }

        let stored: StoredFile = sink.close().await.map_err(|e| {
            tracing::error!(upload_id = %upload_id, filename = %filename, error = %e, "Failed to close destination");
            UploadError::StorageError(e)
        })?;

        tracing::info!(
            upload_id = %upload_id,
            filename = %stored.filename,
            size = stored.size,
            location = %stored.path.display(),
            "File stored successfully"
        );

        Ok(UploadResponse {
            location: stored.location(),
            filename: stored.filename,
        })
    }

    /// Copy `body` into `sink`, holding at most one chunk in memory
    async fn stream_chunks<R>(
        &self,
        upload_id: Uuid,
        mut body: R,
        sink: &mut StorageSink,
    ) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut chunk = Vec::with_capacity(self.chunk_size.min(64 * 1024));
        let mut chunk_number = 0u64;

        loop {
            chunk.clear();
            let read = (&mut body)
                .take(self.chunk_size as u64)
                .read_to_end(&mut chunk)
                .await?;
            if read == 0 {
                break;
            }

            sink.write(&chunk).await?;
            chunk_number += 1;

            tracing::debug!(
                upload_id = %upload_id,
                chunk_number = chunk_number,
                chunk_size = read,
                total_size = sink.bytes_written(),
                "Chunk written"
            );
        }

        Ok(())
    }
}
