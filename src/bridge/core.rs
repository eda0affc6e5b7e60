//! Bridge core
//!
//! Runs method calls against a shared storage backend without blocking the
//! async runtime.

use log::{debug, error};
use std::sync::Arc;

use crate::config::ExportConfig;
use crate::error::handlers::{SAF_DELETE_ERROR, SAF_WRITE_ERROR};
use crate::protocol::{MethodCall, Request, Response, handle_request};
use crate::storage::TreeStorage;

/// Async facade over one storage backend.
///
/// Each call runs the blocking core on tokio's blocking pool and resolves only
/// after the stream has been closed or the delete primitive has reported.
/// Calls are not serialized: two in-flight calls against overlapping paths of
/// the same root race, last writer wins.
pub struct Bridge<S> {
    storage: Arc<S>,
    config: Arc<ExportConfig>,
}

impl<S> Clone for Bridge<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> Bridge<S>
where
    S: TreeStorage + Send + Sync + 'static,
{
    pub fn new(storage: S, config: ExportConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Handles one method call to completion.
    pub async fn call(&self, call: MethodCall) -> Response {
        let request = Request::from_call(&call);
        let failure_code = match &request {
            Request::WriteFile(_) => SAF_WRITE_ERROR,
            Request::DeleteDirectory(_) => SAF_DELETE_ERROR,
            Request::Unsupported(_) => return Response::NotImplemented,
        };
        debug!("Dispatching {} to blocking pool", call.method);

        let storage = Arc::clone(&self.storage);
        let config = Arc::clone(&self.config);

        match tokio::task::spawn_blocking(move || handle_request(&*storage, request, &config)).await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Worker for {} failed: {}", call.method, e);
                Response::Error {
                    code: failure_code,
                    message: format!("Worker task failed: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTree;

    const ROOT: &str = "mem://bridge";

    fn bridge() -> Bridge<MemoryTree> {
        let tree = MemoryTree::new();
        tree.add_root(ROOT).unwrap();
        Bridge::new(tree, ExportConfig::default())
    }

    #[tokio::test]
    async fn write_then_delete_round() {
        let bridge = bridge();
        let write = MethodCall::new("writeFile")
            .with_text("directoryUri", ROOT)
            .with_text("relativePath", "tasks/todo.md")
            .with_bytes("content", b"- [ ] buy milk".to_vec());
        assert_eq!(bridge.call(write).await, Response::Success(true));
        assert_eq!(
            bridge.storage().read_file(ROOT, "tasks/todo.md").unwrap(),
            b"- [ ] buy milk"
        );

        let delete = MethodCall::new("deleteDirectory")
            .with_text("directoryUri", ROOT)
            .with_text("relativePath", "tasks");
        assert_eq!(bridge.call(delete).await, Response::Success(true));
        assert!(!bridge.storage().exists(ROOT, "tasks"));
    }

    #[tokio::test]
    async fn unknown_method_short_circuits() {
        let bridge = bridge();
        let response = bridge.call(MethodCall::new("pickDirectory")).await;
        assert_eq!(response, Response::NotImplemented);
    }

    #[tokio::test]
    async fn clones_share_the_backend() {
        let bridge = bridge();
        let other = bridge.clone();
        assert_eq!(other.config(), bridge.config());
        let write = MethodCall::new("writeFile")
            .with_text("directoryUri", ROOT)
            .with_text("relativePath", "a.md")
            .with_text("content", "text");
        assert!(other.call(write).await.is_success());
        assert_eq!(bridge.storage().read_file(ROOT, "a.md").unwrap(), b"text");
    }
}
