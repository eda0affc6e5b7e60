//! Navigation operations implementation

use log::debug;

use crate::error::ExportError;
use crate::navigate::results::Resolution;
use crate::storage::{ChildEntry, TreeStorage};

/// Walks `segments` from `root`, one exact-name lookup per segment.
///
/// With `create_missing` every absent directory is created, and a segment
/// already taken by a file is a `NameCollision`. Without it nothing is
/// mutated: the first absent or non-directory segment ends the walk with
/// `Resolution::AbsentStop`.
pub fn resolve<S: TreeStorage>(
    storage: &S,
    root: S::Handle,
    segments: &[String],
    create_missing: bool,
) -> Result<Resolution<S::Handle>, ExportError> {
    let mut current = root;
    let mut created = 0;

    for segment in segments {
        current = match (storage.find_child(&current, segment)?, create_missing) {
            (Some(ChildEntry::Directory(dir)), _) => {
                debug!("Descending into existing directory {}", segment);
                dir
            }
            (Some(ChildEntry::File(_) | ChildEntry::Special(_)), true) => {
                return Err(ExportError::NameCollision(segment.clone()));
            }
            (Some(ChildEntry::File(_) | ChildEntry::Special(_)), false) | (None, false) => {
                return Ok(Resolution::AbsentStop {
                    segment: segment.clone(),
                });
            }
            (None, true) => {
                let dir = storage
                    .create_directory(&current, segment)?
                    .ok_or_else(|| ExportError::DirectoryCreateFailed(segment.clone()))?;
                debug!("Created directory {}", segment);
                created += 1;
                dir
            }
        };
    }

    Ok(Resolution::Resolved {
        handle: current,
        created,
    })
}
