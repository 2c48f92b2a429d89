//! Chunkdrop Server Library
//!
//! Streaming upload service backed by a single local directory. The main
//! server binary is in main.rs.
//!
//! # Modules
//!
//! - `upload`: Extension whitelist and the chunked upload handler
//! - `storage`: Upload directory, write sink and listing
//! - `routes`: HTTP endpoints

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod upload;
