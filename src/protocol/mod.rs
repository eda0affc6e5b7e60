//! Request/response contract
//!
//! Turns inbound method calls into typed requests and reports one of three
//! outcome categories: success with a boolean, a coded error, or not
//! implemented.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{ArgValue, DeleteDirectoryRequest, MethodCall, Request, WriteFileRequest};
pub use handlers::{handle_call, handle_request};
pub use responses::Response;
