//! Navigate module
//!
//! Splits relative paths into segments and walks them against a storage
//! root, optionally creating the directories that are missing.

mod operations;
mod path;
mod results;

// Re-export public types and functions
pub use operations::resolve;
pub use path::RelativePath;
pub use results::Resolution;
