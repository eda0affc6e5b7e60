//! Local filesystem backend
//!
//! Roots are `file://` URIs or plain paths naming an existing directory.

use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;
use url::Url;

use crate::error::StorageError;
use crate::storage::backend::{ChildEntry, TreeStorage};

const FILE_SCHEME: &str = "file:";

/// Tree storage rooted in directories on the local disk.
#[derive(Debug, Clone, Default)]
pub struct LocalTree;

impl LocalTree {
    pub fn new() -> Self {
        LocalTree
    }
}

/// Turn a root handle string into a filesystem path; `file:` URIs are
/// percent-decoded, anything else is taken as a plain path
fn uri_to_path(uri: &str) -> Option<PathBuf> {
    if !uri.starts_with(FILE_SCHEME) {
        return Some(PathBuf::from(uri));
    }
    match Url::parse(uri) {
        Ok(url) => url.to_file_path().ok(),
        Err(e) => {
            debug!("Root {} is not a valid file URI: {}", uri, e);
            None
        }
    }
}

impl TreeStorage for LocalTree {
    type Handle = PathBuf;
    type Writer = File;

    fn resolve_root(&self, uri: &str) -> Result<PathBuf, StorageError> {
        let path = match uri_to_path(uri) {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(StorageError::RootInaccessible(uri.to_string())),
        };

        match path.canonicalize() {
            Ok(root) if root.is_dir() => Ok(root),
            Ok(_) => Err(StorageError::RootInaccessible(uri.to_string())),
            Err(e) => {
                debug!("Root {} not accessible: {}", uri, e);
                Err(StorageError::RootInaccessible(uri.to_string()))
            }
        }
    }

    fn find_child(
        &self,
        dir: &PathBuf,
        name: &str,
    ) -> Result<Option<ChildEntry<PathBuf>>, StorageError> {
        let path = dir.join(name);

        // symlink_metadata: links are reported as-is, never followed
        match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => Ok(Some(ChildEntry::Directory(path))),
            Ok(meta) if meta.is_file() => Ok(Some(ChildEntry::File(path))),
            Ok(_) => Ok(Some(ChildEntry::Special(path))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn create_directory(&self, dir: &PathBuf, name: &str) -> Result<Option<PathBuf>, StorageError> {
        let path = dir.join(name);
        match fs::create_dir(&path) {
            Ok(()) => Ok(Some(path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("Directory {} appeared concurrently", path.display());
                Ok(None)
            }
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn create_file(
        &self,
        dir: &PathBuf,
        mime_type: &str,
        name: &str,
    ) -> Result<Option<PathBuf>, StorageError> {
        let path = dir.join(name);
        debug!("Creating {} ({})", path.display(), mime_type);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Some(path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("File {} appeared concurrently", path.display());
                Ok(None)
            }
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn open_output_stream(&self, file: &PathBuf) -> Result<Option<File>, StorageError> {
        match OpenOptions::new().write(true).truncate(true).open(file) {
            Ok(f) => Ok(Some(f)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn delete_recursive(&self, dir: &PathBuf) -> Result<bool, StorageError> {
        match fs::remove_dir_all(dir) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(e) => {
                warn!("Recursive delete of {} failed: {}", dir.display(), e);
                Ok(false)
            }
        }
    }
}
