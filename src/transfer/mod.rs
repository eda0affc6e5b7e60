//! Transfer module
//!
//! Writes file payloads under a storage root, creating the directory chain
//! on the way.

pub mod file_ops;
pub mod results;

// Re-export key types and functions
pub use file_ops::{DEFAULT_MIME_TYPE, write_file};
pub use results::{LeafAction, WriteResult};
