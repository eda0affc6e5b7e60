//! Bridge
//!
//! Async entry point the application layer calls into.

pub mod core;

pub use self::core::Bridge;
