//! Result types for navigate operations

/// Outcome of walking a segment list from a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<H> {
    /// Every segment resolved; holds the final directory.
    Resolved { handle: H, created: usize },
    /// Lookup-only walk hit a missing or non-directory segment.
    AbsentStop { segment: String },
}
