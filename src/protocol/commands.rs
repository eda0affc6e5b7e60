//! Module `commands`
//!
//! Inbound method calls and the typed requests parsed from them.

use std::collections::HashMap;

pub const METHOD_WRITE_FILE: &str = "writeFile";
pub const METHOD_DELETE_DIRECTORY: &str = "deleteDirectory";

pub const ARG_DIRECTORY_URI: &str = "directoryUri";
pub const ARG_RELATIVE_PATH: &str = "relativePath";
pub const ARG_CONTENT: &str = "content";
pub const ARG_MIME_TYPE: &str = "mimeType";

/// A single argument value carried by a method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Bytes(Vec<u8>),
}

/// An untyped call as it arrives from the application layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: HashMap<String, ArgValue>,
}

impl MethodCall {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.arguments
            .insert(name.to_string(), ArgValue::Text(value.to_string()));
        self
    }

    pub fn with_bytes(mut self, name: &str, value: Vec<u8>) -> Self {
        self.arguments
            .insert(name.to_string(), ArgValue::Bytes(value));
        self
    }

    /// Text argument; a value of the wrong kind counts as absent.
    fn text(&self, name: &str) -> Option<String> {
        match self.arguments.get(name) {
            Some(ArgValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Byte argument; text is accepted as its UTF-8 bytes.
    fn bytes(&self, name: &str) -> Option<Vec<u8>> {
        match self.arguments.get(name) {
            Some(ArgValue::Bytes(b)) => Some(b.clone()),
            Some(ArgValue::Text(s)) => Some(s.clone().into_bytes()),
            None => None,
        }
    }
}

/// Arguments of a write request before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteFileRequest {
    pub directory_uri: Option<String>,
    pub relative_path: Option<String>,
    pub content: Option<Vec<u8>>,
    pub mime_type: Option<String>,
}

/// Arguments of a delete request before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteDirectoryRequest {
    pub directory_uri: Option<String>,
    pub relative_path: Option<String>,
}

/// The closed set of operations, plus anything else by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    WriteFile(WriteFileRequest),
    DeleteDirectory(DeleteDirectoryRequest),
    Unsupported(String),
}

impl Request {
    /// Maps a method call onto a typed request. Missing arguments are kept as
    /// `None` and reported when the request is handled.
    pub fn from_call(call: &MethodCall) -> Self {
        match call.method.as_str() {
            METHOD_WRITE_FILE => Request::WriteFile(WriteFileRequest {
                directory_uri: call.text(ARG_DIRECTORY_URI),
                relative_path: call.text(ARG_RELATIVE_PATH),
                content: call.bytes(ARG_CONTENT),
                mime_type: call.text(ARG_MIME_TYPE),
            }),
            METHOD_DELETE_DIRECTORY => Request::DeleteDirectory(DeleteDirectoryRequest {
                directory_uri: call.text(ARG_DIRECTORY_URI),
                relative_path: call.text(ARG_RELATIVE_PATH),
            }),
            other => Request::Unsupported(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_write_call() {
        let call = MethodCall::new("writeFile")
            .with_text("directoryUri", "mem://root")
            .with_text("relativePath", "tasks/todo.md")
            .with_bytes("content", b"- [ ] buy milk".to_vec());

        assert_eq!(
            Request::from_call(&call),
            Request::WriteFile(WriteFileRequest {
                directory_uri: Some("mem://root".into()),
                relative_path: Some("tasks/todo.md".into()),
                content: Some(b"- [ ] buy milk".to_vec()),
                mime_type: None,
            })
        );
    }

    #[test]
    fn wrong_kind_counts_as_missing() {
        let call = MethodCall::new("deleteDirectory")
            .with_bytes("directoryUri", b"mem://root".to_vec())
            .with_text("relativePath", "tasks");

        match Request::from_call(&call) {
            Request::DeleteDirectory(req) => {
                assert_eq!(req.directory_uri, None);
                assert_eq!(req.relative_path.as_deref(), Some("tasks"));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn unknown_method_is_unsupported() {
        let call = MethodCall::new("pickDirectory");
        assert_eq!(
            Request::from_call(&call),
            Request::Unsupported("pickDirectory".into())
        );
    }
}
