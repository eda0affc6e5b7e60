//! Storage operations
//!
//! Removes directory subtrees under a storage root.

use log::{info, warn};

use crate::error::ExportError;
use crate::navigate::{RelativePath, Resolution, resolve};
use crate::storage::backend::TreeStorage;
use crate::storage::results::DeleteOutcome;

/// Deletes the directory at `relative_path` and everything beneath it.
///
/// A path that stops existing at any segment (or runs into a file) counts as
/// already deleted. The recursive delete primitive runs at most once.
pub fn delete_directory<S: TreeStorage>(
    storage: &S,
    directory_uri: &str,
    relative_path: &str,
) -> Result<DeleteOutcome, ExportError> {
    let path = RelativePath::for_delete(relative_path)?;
    let root = storage.resolve_root(directory_uri)?;

    let target = match resolve(storage, root, &path.segments(), false)? {
        Resolution::Resolved { handle, .. } => handle,
        Resolution::AbsentStop { segment } => {
            info!(
                "Nothing to delete at {} (segment {} absent) under {}",
                relative_path, segment, directory_uri
            );
            return Ok(DeleteOutcome::AlreadyAbsent);
        }
    };

    if storage.delete_recursive(&target)? {
        info!("Deleted directory {} under {}", relative_path, directory_uri);
        Ok(DeleteOutcome::Deleted)
    } else {
        warn!(
            "Backend declined to delete {} under {}",
            relative_path, directory_uri
        );
        Ok(DeleteOutcome::Declined)
    }
}
