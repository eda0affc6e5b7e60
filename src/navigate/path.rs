//! Relative path parsing

use crate::error::PathError;
use crate::utils::validation::is_valid_segment;

/// A `/`-delimited relative path split into intermediate directories and a leaf.
///
/// Empty segments (leading, trailing or doubled delimiters) are dropped for
/// both writes and deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePath {
    directories: Vec<String>,
    leaf: String,
}

fn split_segments(raw: &str) -> Result<Vec<String>, PathError> {
    raw.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if is_valid_segment(s) {
                Ok(s.to_string())
            } else {
                Err(PathError::InvalidSegment(s.to_string()))
            }
        })
        .collect()
}

impl RelativePath {
    /// Parse a write target. The last segment is the file name; a trailing
    /// delimiter leaves no file name and is rejected.
    pub fn for_write(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() || raw.ends_with('/') {
            return Err(PathError::EmptyFileName(raw.to_string()));
        }
        let mut directories = split_segments(raw)?;
        let leaf = directories
            .pop()
            .ok_or_else(|| PathError::EmptyFileName(raw.to_string()))?;
        Ok(Self { directories, leaf })
    }

    /// Parse a delete target. The last segment is the directory to remove;
    /// a path naming no directory at all is rejected so the root survives.
    pub fn for_delete(raw: &str) -> Result<Self, PathError> {
        let mut directories = split_segments(raw)?;
        let leaf = directories.pop().ok_or(PathError::EmptyPath)?;
        Ok(Self { directories, leaf })
    }

    /// Intermediate directory names, outermost first.
    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// All segments including the leaf.
    pub fn segments(&self) -> Vec<String> {
        let mut all = self.directories.clone();
        all.push(self.leaf.clone());
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_path_splits_leaf() {
        let path = RelativePath::for_write("tasks/2024/todo.md").unwrap();
        assert_eq!(path.directories(), ["tasks", "2024"]);
        assert_eq!(path.leaf(), "todo.md");
    }

    #[test]
    fn write_path_without_directories() {
        let path = RelativePath::for_write("todo.md").unwrap();
        assert!(path.directories().is_empty());
        assert_eq!(path.leaf(), "todo.md");
    }

    #[test]
    fn write_path_drops_empty_segments() {
        let path = RelativePath::for_write("/tasks//todo.md").unwrap();
        assert_eq!(path.directories(), ["tasks"]);
    }

    #[test]
    fn write_path_needs_a_file_name() {
        assert_eq!(
            RelativePath::for_write("tasks/"),
            Err(PathError::EmptyFileName("tasks/".into()))
        );
        assert_eq!(
            RelativePath::for_write(""),
            Err(PathError::EmptyFileName(String::new()))
        );
        assert!(RelativePath::for_write("///x").is_ok());
    }

    #[test]
    fn delete_path_tolerates_stray_delimiters() {
        let path = RelativePath::for_delete("/tasks/archive/").unwrap();
        assert_eq!(path.segments(), ["tasks", "archive"]);
    }

    #[test]
    fn delete_path_refuses_root() {
        assert_eq!(RelativePath::for_delete("//"), Err(PathError::EmptyPath));
        assert_eq!(RelativePath::for_delete(""), Err(PathError::EmptyPath));
    }

    #[test]
    fn traversal_is_rejected() {
        assert_eq!(
            RelativePath::for_write("../escape.md"),
            Err(PathError::InvalidSegment("..".into()))
        );
        assert_eq!(
            RelativePath::for_delete("tasks/./x"),
            Err(PathError::InvalidSegment(".".into()))
        );
    }
}
