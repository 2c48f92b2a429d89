//! Configuration management for Chunkdrop Server

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

/// Default chunk size: 10MB
pub const DEFAULT_CHUNK_SIZE: usize = 10 * 1024 * 1024;

/// Extensions accepted when `ALLOWED_EXTENSIONS` is not set
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] =
    &["txt", "pdf", "png", "jpg", "jpeg", "gif", "mp4", "mkv"];

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Flat directory every upload lands in
    pub upload_dir: PathBuf,
    /// Upper bound on bytes held in memory per upload
    pub chunk_size: usize,
    pub allowed_extensions: HashSet<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("UPLOAD_CHUNK_SIZE must be greater than zero")]
    ZeroChunkSize,

    #[error("ALLOWED_EXTENSIONS must name at least one extension")]
    NoExtensions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            storage: StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            upload_dir: PathBuf::from("./uploads"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl StorageConfig {
    /// Storage settings rooted at `upload_dir`, everything else default
    pub fn with_upload_dir(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = StorageConfig::default();

        let chunk_size = match env::var("UPLOAD_CHUNK_SIZE") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                name: "UPLOAD_CHUNK_SIZE",
                value: raw.clone(),
            })?,
            Err(_) => defaults.chunk_size,
        };
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }

        let allowed_extensions = match env::var("ALLOWED_EXTENSIONS") {
            Ok(raw) => parse_extension_list(&raw)?,
            Err(_) => defaults.allowed_extensions,
        };

        let port = match env::var("SERVER_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value: raw.clone(),
            })?,
            Err(_) => 8000,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            storage: StorageConfig {
                upload_dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.upload_dir),
                chunk_size,
                allowed_extensions,
            },
        })
    }
}

/// Split a comma separated list. Entries are trimmed of surrounding
/// whitespace but otherwise kept verbatim (matching stays case-sensitive).
fn parse_extension_list(raw: &str) -> Result<HashSet<String>, ConfigError> {
    let set: HashSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect();

    if set.is_empty() {
        return Err(ConfigError::NoExtensions);
    }
    Ok(set)
}
