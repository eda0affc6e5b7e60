//! tree-export - Entry Point
//!
//! Runs one writeFile/deleteDirectory call against a local directory root.
//!
//! ```text
//! tree-export writeFile <directoryUri> <relativePath> [mimeType] < content
//! tree-export deleteDirectory <directoryUri> <relativePath>
//! ```

use log::{error, info};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

use tree_export::Bridge;
use tree_export::config::ExportConfig;
use tree_export::protocol::commands::{
    ARG_CONTENT, ARG_DIRECTORY_URI, ARG_MIME_TYPE, ARG_RELATIVE_PATH, METHOD_WRITE_FILE,
};
use tree_export::protocol::{MethodCall, Response};
use tree_export::storage::LocalTree;
use tree_export::utils::logging::setup_logging;

/// Builds the method call from positional arguments; absent ones stay absent.
async fn call_from_args(args: &[String]) -> std::io::Result<MethodCall> {
    let method = args.first().map(String::as_str).unwrap_or_default();
    let mut call = MethodCall::new(method);

    if let Some(uri) = args.get(1) {
        call = call.with_text(ARG_DIRECTORY_URI, uri);
    }
    if let Some(path) = args.get(2) {
        call = call.with_text(ARG_RELATIVE_PATH, path);
    }

    if method == METHOD_WRITE_FILE {
        if let Some(mime) = args.get(3) {
            call = call.with_text(ARG_MIME_TYPE, mime);
        }
        let mut content = Vec::new();
        tokio::io::stdin().read_to_end(&mut content).await?;
        call = call.with_bytes(ARG_CONTENT, content);
    }

    Ok(call)
}

#[tokio::main]
async fn main() -> ExitCode {
    // env_logger picks up RUST_LOG
    setup_logging();

    let config = match ExportConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let call = match call_from_args(&args).await {
        Ok(call) => call,
        Err(e) => {
            error!("Failed to read content from stdin: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Running {} ({:?})", call.method, config);
    let bridge = Bridge::new(LocalTree::new(), config);
    let response = bridge.call(call).await;
    println!("{}", response);

    match response {
        Response::Success(true) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
