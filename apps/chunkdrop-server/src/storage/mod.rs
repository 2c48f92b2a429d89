//! Storage module for the local upload directory
//!
//! All uploads live as direct children of a single flat directory. Writes
//! go through a [`StorageSink`]; listings stat every entry live.

mod directory;
mod listing;
mod types;

pub use directory::{StorageSink, UploadDirectory};
pub use types::*;
