//! Test data generator

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::Result;

const MIB: usize = 1024 * 1024;

/// Write `size_mb` MiB of `A` bytes to `path`, one MiB at a time.
/// Returns the number of bytes written.
pub async fn generate_file(path: impl AsRef<Path>, size_mb: u64) -> Result<u64> {
    let path = path.as_ref();
    let block = vec![b'A'; MIB];
    let mut file = tokio::fs::File::create(path).await?;

    for _ in 0..size_mb {
        file.write_all(&block).await?;
    }
    file.flush().await?;

    let written = size_mb * MIB as u64;
    tracing::info!(path = %path.display(), bytes = written, "Generated test file");
    Ok(written)
}
