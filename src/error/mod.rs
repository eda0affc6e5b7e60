//! Error handling
//!
//! Defines error types and handling for the export core.

pub mod handlers;
pub mod types;

pub use types::*;
