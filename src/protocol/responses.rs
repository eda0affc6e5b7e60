//! Response handling
//!
//! The three outcome categories reported back to the caller.

use std::fmt;

use crate::error::BridgeError;
use crate::error::handlers::error_code;

/// Outcome of one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(bool),
    Error { code: &'static str, message: String },
    NotImplemented,
}

impl Response {
    pub fn from_error(err: &BridgeError) -> Self {
        Response::Error {
            code: error_code(err),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Success(value) => write!(f, "OK {}", value),
            Response::Error { code, message } => write!(f, "ERR {} {}", code, message),
            Response::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
        }
    }
}
