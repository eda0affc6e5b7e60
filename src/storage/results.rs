//! Storage result types
//!
//! Defines result structures returned by storage operations.

/// Result of a subtree deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The directory existed and the backend removed it.
    Deleted,
    /// Some segment of the path did not exist as a directory.
    AlreadyAbsent,
    /// The backend ran the delete but reported failure.
    Declined,
}

impl DeleteOutcome {
    /// Boolean reported to the caller; only `Declined` is `false`.
    pub fn as_bool(self) -> bool {
        !matches!(self, DeleteOutcome::Declined)
    }
}
