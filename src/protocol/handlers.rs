//! Request handlers
//!
//! Validates typed requests, runs them against a storage backend and maps
//! the outcome onto a `Response`.

use log::{info, warn};

use crate::config::ExportConfig;
use crate::error::BridgeError;
use crate::error::handlers::handle_error;
use crate::protocol::commands::{DeleteDirectoryRequest, MethodCall, Request, WriteFileRequest};
use crate::protocol::responses::Response;
use crate::storage::{TreeStorage, delete_directory};
use crate::transfer::write_file;

const MISSING_ARGUMENTS: &str = "Missing required arguments";

/// Parses and dispatches an untyped method call.
pub fn handle_call<S: TreeStorage>(storage: &S, call: &MethodCall, config: &ExportConfig) -> Response {
    handle_request(storage, Request::from_call(call), config)
}

/// Dispatches a typed request to its handler.
pub fn handle_request<S: TreeStorage>(
    storage: &S,
    request: Request,
    config: &ExportConfig,
) -> Response {
    let result = match request {
        Request::WriteFile(req) => handle_write_file(storage, req, config),
        Request::DeleteDirectory(req) => handle_delete_directory(storage, req),
        Request::Unsupported(method) => {
            warn!("Method not implemented: {}", method);
            return Response::NotImplemented;
        }
    };

    match result {
        Ok(value) => Response::Success(value),
        Err(e) => {
            handle_error(&e);
            Response::from_error(&e)
        }
    }
}

/// Handles a write: all of directory URI, relative path and content are required.
pub fn handle_write_file<S: TreeStorage>(
    storage: &S,
    request: WriteFileRequest,
    config: &ExportConfig,
) -> Result<bool, BridgeError> {
    let (Some(directory_uri), Some(relative_path), Some(content)) =
        (request.directory_uri, request.relative_path, request.content)
    else {
        return Err(BridgeError::InvalidArgument(MISSING_ARGUMENTS.into()));
    };
    let mime_type = request
        .mime_type
        .unwrap_or_else(|| config.default_mime_type.clone());

    write_file(
        storage,
        &directory_uri,
        &relative_path,
        &content,
        &mime_type,
        config.max_file_size_bytes(),
    )
    .map_err(BridgeError::Write)?;

    Ok(true)
}

/// Handles a delete: directory URI and relative path are required.
pub fn handle_delete_directory<S: TreeStorage>(
    storage: &S,
    request: DeleteDirectoryRequest,
) -> Result<bool, BridgeError> {
    let (Some(directory_uri), Some(relative_path)) =
        (request.directory_uri, request.relative_path)
    else {
        return Err(BridgeError::InvalidArgument(MISSING_ARGUMENTS.into()));
    };

    let outcome =
        delete_directory(storage, &directory_uri, &relative_path).map_err(BridgeError::Delete)?;
    info!("deleteDirectory {} -> {:?}", relative_path, outcome);
    Ok(outcome.as_bool())
}
