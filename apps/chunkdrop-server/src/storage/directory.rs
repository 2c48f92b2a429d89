//! Upload directory and write sink

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::types::StoredFile;

// ============================================================================
// Upload Directory
// ============================================================================

/// Root directory for stored files.
///
/// Cloning is cheap and every clone refers to the same directory. Nothing in
/// this crate ever removes it.
#[derive(Debug, Clone)]
pub struct UploadDirectory {
    root: PathBuf,
}

impl UploadDirectory {
    /// Create the directory (and parents) if missing
    pub async fn init(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!(path = %root.display(), "Upload directory ready");
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Destination path for `filename`.
    ///
    /// The name is joined as-is. Separators or `..` in it are not
    /// confined to the upload directory.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Open `filename` for writing, truncating any existing content
    pub async fn open_for_write(&self, filename: &str) -> io::Result<StorageSink> {
        let path = self.resolve(filename);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await?;

        Ok(StorageSink {
            filename: filename.to_string(),
            path,
            file,
            bytes_written: 0,
        })
    }
}

// ============================================================================
// Storage Sink
// ============================================================================

/// An open destination file.
///
/// The descriptor is owned by the sink. Finish with [`StorageSink::close`] on
/// success or [`StorageSink::abort`] on failure so pending writes settle
/// before the caller sees the outcome.
#[derive(Debug)]
pub struct StorageSink {
    filename: String,
    path: PathBuf,
    file: File,
    bytes_written: u64,
}

impl StorageSink {
    pub async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Release the descriptor after a failed upload.
    ///
    /// Waits for any write still in flight so the partial file on disk is
    /// complete when this returns. A flush failure is logged, not returned:
    /// the caller already has the error that ended the upload.
    pub async fn abort(self) {
        let StorageSink {
            path,
            mut file,
            bytes_written,
            ..
        } = self;

        if let Err(e) = file.flush().await {
            tracing::warn!(
                path = %path.display(),
                bytes_written = bytes_written,
                error = %e,
                "Failed to flush partial file"
            );
        }
        drop(file);
    }

    /// Flush, release the descriptor and report the size found on disk
    pub async fn close(self) -> io::Result<StoredFile> {
        let StorageSink {
            filename,
            path,
            mut file,
            bytes_written,
        } = self;

        file.flush().await?;
        drop(file);

        let size = tokio::fs::metadata(&path).await?.len();
        if size != bytes_written {
            // Another writer touched the same name while we were streaming.
            tracing::warn!(
                path = %path.display(),
                bytes_written = bytes_written,
                size_on_disk = size,
                "Stored size differs from bytes written"
            );
        }

        Ok(StoredFile {
            filename,
            path,
            size,
        })
    }
}
