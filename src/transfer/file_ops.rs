//! Module `file_ops`
//!
//! Creates or overwrites a file at a relative path under a storage root.
//! Missing intermediate directories are created; an existing file is
//! truncated and rewritten in place, never renamed or versioned.

use log::{error, info};
use std::io::Write;

use crate::error::ExportError;
use crate::navigate::{RelativePath, Resolution, resolve};
use crate::storage::{ChildEntry, TreeStorage};
use crate::transfer::results::{LeafAction, WriteResult};

pub const DEFAULT_MIME_TYPE: &str = "text/markdown";

/// Writes `content` to `relative_path` under the root named by `directory_uri`.
///
/// The payload is written in one `write_all`, flushed, and the stream is
/// closed before this returns. Content larger than `max_file_size` bytes is
/// rejected before the storage root is touched.
pub fn write_file<S: TreeStorage>(
    storage: &S,
    directory_uri: &str,
    relative_path: &str,
    content: &[u8],
    mime_type: &str,
    max_file_size: u64,
) -> Result<WriteResult, ExportError> {
    let size = content.len() as u64;
    if size > max_file_size {
        return Err(ExportError::ContentTooLarge {
            size,
            limit: max_file_size,
        });
    }

    let path = RelativePath::for_write(relative_path)?;
    let root = storage.resolve_root(directory_uri)?;

    let (dir, directories_created) = match resolve(storage, root, path.directories(), true)? {
        Resolution::Resolved { handle, created } => (handle, created),
        // Creating walks never stop early; treat it as a creation failure.
        Resolution::AbsentStop { segment } => {
            return Err(ExportError::DirectoryCreateFailed(segment));
        }
    };

    let file_name = path.leaf();
    let (target, leaf) = match storage.find_child(&dir, file_name)? {
        Some(ChildEntry::File(existing)) => (existing, LeafAction::Overwritten),
        Some(ChildEntry::Directory(_) | ChildEntry::Special(_)) => {
            return Err(ExportError::NameCollision(file_name.to_string()));
        }
        None => {
            let created = storage
                .create_file(&dir, mime_type, file_name)?
                .ok_or_else(|| ExportError::FileCreateFailed(file_name.to_string()))?;
            (created, LeafAction::Created)
        }
    };

    let mut stream = storage
        .open_output_stream(&target)?
        .ok_or_else(|| ExportError::StreamOpenFailed(file_name.to_string()))?;

    if let Err(e) = stream.write_all(content).and_then(|_| stream.flush()) {
        error!("Failed writing {} under {}: {}", relative_path, directory_uri, e);
        return Err(ExportError::from(e));
    }

    // Explicitly close the stream before reporting success
    drop(stream);

    info!(
        "Wrote {} ({} bytes, {:?}, {} new directories) under {}",
        relative_path,
        content.len(),
        leaf,
        directories_created,
        directory_uri
    );

    Ok(WriteResult {
        bytes_written: content.len(),
        leaf,
        directories_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::storage::{FaultPlan, MemoryTree};

    const ROOT: &str = "mem://todo";
    const LIMIT: u64 = 1024;

    fn tree() -> MemoryTree {
        let tree = MemoryTree::new();
        tree.add_root(ROOT).unwrap();
        tree
    }

    #[test]
    fn creates_directory_and_file_in_empty_root() {
        let tree = tree();
        let result = write_file(
            &tree,
            ROOT,
            "tasks/todo.md",
            b"- [ ] buy milk",
            DEFAULT_MIME_TYPE,
            LIMIT,
        )
        .unwrap();

        assert_eq!(
            result,
            WriteResult {
                bytes_written: 14,
                leaf: LeafAction::Created,
                directories_created: 1,
            }
        );
        assert!(tree.is_directory(ROOT, "tasks"));
        assert_eq!(tree.read_file(ROOT, "tasks/todo.md").unwrap(), b"- [ ] buy milk");
        assert_eq!(tree.mime_type(ROOT, "tasks/todo.md").unwrap(), "text/markdown");
    }

    #[test]
    fn overwrites_existing_file_completely() {
        let tree = tree();
        tree.seed_file(ROOT, "tasks/todo.md", b"- [ ] buy milk\n- [ ] call mum")
            .unwrap();

        let result =
            write_file(&tree, ROOT, "tasks/todo.md", b"done", DEFAULT_MIME_TYPE, LIMIT).unwrap();

        assert_eq!(result.leaf, LeafAction::Overwritten);
        assert_eq!(result.directories_created, 0);
        assert_eq!(tree.read_file(ROOT, "tasks/todo.md").unwrap(), b"done");
        assert_eq!(tree.list(ROOT, ""), ["tasks"]);
        assert_eq!(tree.list(ROOT, "tasks"), ["todo.md"]);
        let stats = tree.stats().unwrap();
        assert_eq!(stats.files_created, 0);
        assert_eq!(stats.streams_opened, 1);
    }

    #[test]
    fn writing_same_bytes_twice_is_stable() {
        let tree = tree();
        for _ in 0..2 {
            write_file(&tree, ROOT, "a/b/c.md", b"same", DEFAULT_MIME_TYPE, LIMIT).unwrap();
        }
        assert_eq!(tree.read_file(ROOT, "a/b/c.md").unwrap(), b"same");
        let stats = tree.stats().unwrap();
        assert_eq!(stats.directories_created, 2);
        assert_eq!(stats.files_created, 1);
    }

    #[test]
    fn keeps_the_content_type_hint() {
        let tree = tree();
        write_file(&tree, ROOT, "data.json", b"{}", "application/json", LIMIT).unwrap();
        assert_eq!(tree.mime_type(ROOT, "data.json").unwrap(), "application/json");
    }

    #[test]
    fn empty_payload_truncates() {
        let tree = tree();
        tree.seed_file(ROOT, "todo.md", b"old").unwrap();
        write_file(&tree, ROOT, "todo.md", b"", DEFAULT_MIME_TYPE, LIMIT).unwrap();
        assert_eq!(tree.read_file(ROOT, "todo.md").unwrap(), b"");
    }

    #[test]
    fn collision_leaves_tree_untouched() {
        let tree = tree();
        tree.seed_file(ROOT, "a/b", b"file").unwrap();

        let err = write_file(&tree, ROOT, "a/b/c/d.md", b"x", DEFAULT_MIME_TYPE, LIMIT)
            .unwrap_err();
        assert!(matches!(err, ExportError::NameCollision(name) if name == "b"));
        assert_eq!(tree.read_file(ROOT, "a/b").unwrap(), b"file");
        assert_eq!(tree.list(ROOT, "a"), ["b"]);
        assert_eq!(tree.stats().unwrap(), Default::default());
    }

    #[test]
    fn leaf_directory_is_a_collision() {
        let tree = tree();
        tree.seed_directory(ROOT, "tasks/todo.md").unwrap();
        let err =
            write_file(&tree, ROOT, "tasks/todo.md", b"x", DEFAULT_MIME_TYPE, LIMIT).unwrap_err();
        assert!(matches!(err, ExportError::NameCollision(name) if name == "todo.md"));
    }

    #[test]
    fn refused_file_creation() {
        let tree = tree();
        tree.set_faults(FaultPlan {
            refuse_file_creation: true,
            ..FaultPlan::default()
        })
        .unwrap();
        let err = write_file(&tree, ROOT, "todo.md", b"x", DEFAULT_MIME_TYPE, LIMIT).unwrap_err();
        assert!(matches!(err, ExportError::FileCreateFailed(name) if name == "todo.md"));
    }

    #[test]
    fn refused_output_stream() {
        let tree = tree();
        tree.set_faults(FaultPlan {
            refuse_output_stream: true,
            ..FaultPlan::default()
        })
        .unwrap();
        let err = write_file(&tree, ROOT, "todo.md", b"x", DEFAULT_MIME_TYPE, LIMIT).unwrap_err();
        assert!(matches!(err, ExportError::StreamOpenFailed(name) if name == "todo.md"));
    }

    #[test]
    fn oversized_content_touches_nothing() {
        let tree = tree();
        let big = vec![b'x'; 2048];
        let err = write_file(&tree, ROOT, "tasks/big.md", &big, DEFAULT_MIME_TYPE, LIMIT)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::ContentTooLarge {
                size: 2048,
                limit: LIMIT
            }
        ));
        assert!(!tree.exists(ROOT, "tasks"));
    }

    #[test]
    fn trailing_slash_has_no_file_name() {
        let tree = tree();
        let err = write_file(&tree, ROOT, "tasks/", b"x", DEFAULT_MIME_TYPE, LIMIT).unwrap_err();
        assert!(matches!(err, ExportError::Path(PathError::EmptyFileName(_))));
        assert!(!tree.exists(ROOT, "tasks"));
    }
}
