//! Error handlers
//!
//! Maps call-level errors to the codes reported to the invoker.

use crate::error::types::BridgeError;
use log::error;

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const SAF_WRITE_ERROR: &str = "SAF_WRITE_ERROR";
pub const SAF_DELETE_ERROR: &str = "SAF_DELETE_ERROR";

/// Log a call-level error
pub fn handle_error(err: &BridgeError) {
    error!("Export call failed [{}]: {}", error_code(err), err);
}

/// Convert error to its response code
pub fn error_code(err: &BridgeError) -> &'static str {
    match err {
        BridgeError::InvalidArgument(_) => INVALID_ARGUMENT,
        BridgeError::Write(_) => SAF_WRITE_ERROR,
        BridgeError::Delete(_) => SAF_DELETE_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExportError, PathError};

    #[test]
    fn codes_follow_call_category() {
        let write = BridgeError::Write(ExportError::FileCreateFailed("todo.md".into()));
        let delete = BridgeError::Delete(ExportError::Path(PathError::EmptyPath));
        let invalid = BridgeError::InvalidArgument("Missing required arguments".into());

        assert_eq!(error_code(&write), SAF_WRITE_ERROR);
        assert_eq!(error_code(&delete), SAF_DELETE_ERROR);
        assert_eq!(error_code(&invalid), INVALID_ARGUMENT);
    }

    #[test]
    fn messages_carry_the_cause() {
        let err = BridgeError::Write(ExportError::StreamOpenFailed("todo.md".into()));
        assert_eq!(
            err.to_string(),
            "Failed to write file: Failed to open output stream for: todo.md"
        );
    }
}
