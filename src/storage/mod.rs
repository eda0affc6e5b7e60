//! Storage roots
//!
//! The storage capability interface, its backends, and subtree deletion.

pub mod backend;
pub mod local;
pub mod memory;
pub mod operations;
pub mod results;

// Re-export commonly used types
pub use backend::{ChildEntry, TreeStorage};
pub use local::LocalTree;
pub use memory::{FaultPlan, MemoryHandle, MemoryTree, MutationStats};
pub use operations::delete_directory;
pub use results::DeleteOutcome;
