//! Streaming Upload Module
//!
//! Accepts arbitrarily large uploads with bounded memory:
//! - Extension whitelist checked before anything touches the disk
//! - Body copied to the upload directory one chunk at a time
//! - Final size read back from the filesystem
//!
//! There is no resume, deduplication or same-name locking. A second upload
//! with the same filename replaces the first.

pub mod handler;
pub mod types;
pub mod validator;

pub use handler::ChunkedUploadHandler;
pub use types::*;
pub use validator::{extension_of, ExtensionValidator};
