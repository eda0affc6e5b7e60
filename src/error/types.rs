//! Error types
//!
//! Defines domain-specific error types for each layer of the export core.

use std::fmt;
use std::io;

/// Storage backend errors
#[derive(Debug)]
pub enum StorageError {
    RootInaccessible(String),
    InvalidHandle(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::RootInaccessible(uri) => {
                write!(f, "Failed to access directory: {}", uri)
            }
            StorageError::InvalidHandle(h) => write!(f, "Stale or foreign handle: {}", h),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Relative path parsing errors
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    EmptyPath,
    EmptyFileName(String),
    InvalidSegment(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::EmptyPath => write!(f, "Relative path has no segments"),
            PathError::EmptyFileName(p) => write!(f, "No file name in path: {:?}", p),
            PathError::InvalidSegment(s) => write!(f, "Invalid path segment: {:?}", s),
        }
    }
}

impl std::error::Error for PathError {}

/// Failures while resolving, creating, writing or deleting under a root
#[derive(Debug)]
pub enum ExportError {
    Path(PathError),
    Storage(StorageError),
    NameCollision(String),
    DirectoryCreateFailed(String),
    FileCreateFailed(String),
    StreamOpenFailed(String),
    ContentTooLarge { size: u64, limit: u64 },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Path(e) => write!(f, "{}", e),
            ExportError::Storage(e) => write!(f, "{}", e),
            ExportError::NameCollision(name) => {
                write!(f, "Name already used by a non-directory entry: {}", name)
            }
            ExportError::DirectoryCreateFailed(name) => {
                write!(f, "Failed to create directory: {}", name)
            }
            ExportError::FileCreateFailed(name) => write!(f, "Failed to create file: {}", name),
            ExportError::StreamOpenFailed(name) => {
                write!(f, "Failed to open output stream for: {}", name)
            }
            ExportError::ContentTooLarge { size, limit } => {
                write!(f, "Content too large: {} bytes > {} bytes", size, limit)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Path(e) => Some(e),
            ExportError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PathError> for ExportError {
    fn from(error: PathError) -> Self {
        ExportError::Path(error)
    }
}

impl From<StorageError> for ExportError {
    fn from(error: StorageError) -> Self {
        ExportError::Storage(error)
    }
}

impl From<io::Error> for ExportError {
    fn from(error: io::Error) -> Self {
        ExportError::Storage(StorageError::IoError(error))
    }
}

/// Call-level error reported back to the invoker
#[derive(Debug)]
pub enum BridgeError {
    InvalidArgument(String),
    Write(ExportError),
    Delete(ExportError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::InvalidArgument(msg) => write!(f, "{}", msg),
            BridgeError::Write(e) => write!(f, "Failed to write file: {}", e),
            BridgeError::Delete(e) => write!(f, "Failed to delete directory: {}", e),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BridgeError::InvalidArgument(_) => None,
            BridgeError::Write(e) | BridgeError::Delete(e) => Some(e),
        }
    }
}
