//! Input validation utilities
//!
//! Provides validation for individual path segments.

/// Validate that a segment names a single child and cannot climb the tree
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('\\')
        && !segment.contains('\0')
}
