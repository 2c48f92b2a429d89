//! Directory listing

use std::io;

use super::directory::UploadDirectory;
use super::types::FileEntry;

impl UploadDirectory {
    /// List direct children with their current size.
    ///
    /// Order follows the underlying directory enumeration. Entries removed
    /// between enumeration and stat are skipped.
    pub async fn list_files(&self) -> io::Result<Vec<FileEntry>> {
        let mut entries = tokio::fs::read_dir(self.path()).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "Entry vanished during listing");
                    continue;
                }
                Err(e) => return Err(e),
            };

            files.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                location: path.display().to_string(),
            });
        }

        tracing::debug!(count = files.len(), "Listed upload directory");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = UploadDirectory::init(temp_dir.path()).await.unwrap();

        assert!(dir.list_files().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_reports_live_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let dir = UploadDirectory::init(temp_dir.path()).await.unwrap();
        std::fs::write(temp_dir.path().join("file1.txt"), b"dummy content").unwrap();
        std::fs::write(temp_dir.path().join("file2.jpg"), b"").unwrap();

        let mut files = dir.list_files().await.unwrap();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "file1.txt");
        assert_eq!(files[0].size, 13);
        assert_eq!(
            files[0].location,
            temp_dir.path().join("file1.txt").display().to_string()
        );
        assert_eq!(files[1].name, "file2.jpg");
        assert_eq!(files[1].size, 0);

        // Size is read at listing time, not cached
        std::fs::write(temp_dir.path().join("file2.jpg"), b"grown").unwrap();
        let files = dir.list_files().await.unwrap();
        let file2 = files.iter().find(|f| f.name == "file2.jpg").unwrap();
        assert_eq!(file2.size, 5);
    }

    #[tokio::test]
    async fn test_list_includes_disallowed_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let dir = UploadDirectory::init(temp_dir.path()).await.unwrap();
        std::fs::write(temp_dir.path().join("placed.exe"), b"MZ").unwrap();

        let files = dir.list_files().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "placed.exe");
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("uploads");
        let dir = UploadDirectory::init(&root).await.unwrap();
        std::fs::remove_dir(&root).unwrap();

        let err = dir.list_files().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
