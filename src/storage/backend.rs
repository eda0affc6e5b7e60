//! Storage root capability interface
//!
//! The narrow set of primitives the export core needs from a tree-structured
//! storage location. Backends decide what a handle is; the core only passes
//! handles back to the backend that produced them, within a single call.

use std::io::Write;

use crate::error::StorageError;

/// A child found under a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildEntry<H> {
    Directory(H),
    File(H),
    /// Neither a regular file nor a directory (symlink, socket, device).
    /// Never descended into, written through or deleted.
    Special(H),
}

impl<H> ChildEntry<H> {
    pub fn is_directory(&self) -> bool {
        matches!(self, ChildEntry::Directory(_))
    }

    pub fn into_handle(self) -> H {
        match self {
            ChildEntry::Directory(h) | ChildEntry::File(h) | ChildEntry::Special(h) => h,
        }
    }
}

/// Tree-structured storage addressed through opaque root handles.
///
/// Creation primitives return `Ok(None)` when the backend produced no handle
/// without raising an error; the caller turns that into the matching failure.
pub trait TreeStorage {
    type Handle: Clone + std::fmt::Debug;
    type Writer: Write;

    /// Dereference an opaque root handle string.
    fn resolve_root(&self, uri: &str) -> Result<Self::Handle, StorageError>;

    /// Look up a direct child by exact name.
    fn find_child(
        &self,
        dir: &Self::Handle,
        name: &str,
    ) -> Result<Option<ChildEntry<Self::Handle>>, StorageError>;

    fn create_directory(
        &self,
        dir: &Self::Handle,
        name: &str,
    ) -> Result<Option<Self::Handle>, StorageError>;

    /// Create an empty file. `mime_type` is a hint; backends may ignore it.
    fn create_file(
        &self,
        dir: &Self::Handle,
        mime_type: &str,
        name: &str,
    ) -> Result<Option<Self::Handle>, StorageError>;

    /// Open a writer that truncates the file before the first byte lands.
    fn open_output_stream(
        &self,
        file: &Self::Handle,
    ) -> Result<Option<Self::Writer>, StorageError>;

    /// Remove a directory and everything beneath it. `Ok(false)` means the
    /// backend declined or only partially succeeded.
    fn delete_recursive(&self, dir: &Self::Handle) -> Result<bool, StorageError>;
}
