//! Storage types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file that has been fully written and closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub path: PathBuf,
    /// Size as reported by the filesystem after close
    pub size: u64,
}

impl StoredFile {
    pub fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub location: String,
}
