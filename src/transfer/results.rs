//! Transfer result types
//!
//! Defines result structures returned by transfer operations.

/// What happened to the leaf file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafAction {
    Created,
    Overwritten,
}

/// Result of a completed write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    pub bytes_written: usize,
    pub leaf: LeafAction,
    pub directories_created: usize,
}
