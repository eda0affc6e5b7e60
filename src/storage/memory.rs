//! In-memory tree backend
//!
//! A sandboxed tree held in an arena behind a mutex. Useful for embedding and
//! for exercising every failure path of the export core through `FaultPlan`.

use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StorageError;
use crate::storage::backend::{ChildEntry, TreeStorage};

/// Opaque reference to a node of a `MemoryTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryHandle(usize);

/// Primitives a `MemoryTree` should refuse, to simulate a misbehaving provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultPlan {
    pub refuse_directory_creation: bool,
    pub refuse_file_creation: bool,
    pub refuse_output_stream: bool,
    pub decline_delete: bool,
}

/// Counters of successful mutating primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationStats {
    pub directories_created: usize,
    pub files_created: usize,
    pub streams_opened: usize,
    pub deletes: usize,
}

#[derive(Debug)]
enum NodeKind {
    Directory { children: BTreeMap<String, usize> },
    File { mime_type: String, content: Vec<u8> },
}

#[derive(Debug)]
struct Node {
    parent: Option<usize>,
    name: String,
    kind: NodeKind,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<usize, Node>,
    roots: HashMap<String, usize>,
    next_id: usize,
    faults: FaultPlan,
    stats: MutationStats,
}

impl Inner {
    fn insert(&mut self, parent: Option<usize>, name: &str, kind: NodeKind) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                parent,
                name: name.to_string(),
                kind,
            },
        );
        if let Some(parent) = parent {
            if let Some(Node {
                kind: NodeKind::Directory { children },
                ..
            }) = self.nodes.get_mut(&parent)
            {
                children.insert(name.to_string(), id);
            }
        }
        id
    }

    fn children(&self, dir: usize) -> Result<&BTreeMap<String, usize>, StorageError> {
        match self.nodes.get(&dir) {
            Some(Node {
                kind: NodeKind::Directory { children },
                ..
            }) => Ok(children),
            Some(_) => Err(StorageError::InvalidHandle(format!("{} is not a directory", dir))),
            None => Err(StorageError::InvalidHandle(dir.to_string())),
        }
    }

    /// Follow a `/`-separated path from `start`, ignoring empty segments
    fn lookup(&self, start: usize, path: &str) -> Option<usize> {
        let mut current = start;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = *self.children(current).ok()?.get(segment)?;
        }
        Some(current)
    }

    fn remove_subtree(&mut self, id: usize) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                if let NodeKind::Directory { children } = node.kind {
                    pending.extend(children.into_values());
                }
            }
        }
    }
}

/// Tree storage held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    inner: Arc<Mutex<Inner>>,
}

fn poisoned() -> io::Error {
    io::Error::other("memory tree lock poisoned")
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::IoError(poisoned()))
    }

    /// Register an empty root directory reachable through `uri`.
    pub fn add_root(&self, uri: &str) -> Result<MemoryHandle, StorageError> {
        let mut inner = self.lock()?;
        if let Some(id) = inner.roots.get(uri) {
            return Ok(MemoryHandle(*id));
        }
        let id = inner.insert(
            None,
            uri,
            NodeKind::Directory {
                children: BTreeMap::new(),
            },
        );
        inner.roots.insert(uri.to_string(), id);
        Ok(MemoryHandle(id))
    }

    pub fn set_faults(&self, faults: FaultPlan) -> Result<(), StorageError> {
        self.lock()?.faults = faults;
        Ok(())
    }

    pub fn stats(&self) -> Result<MutationStats, StorageError> {
        Ok(self.lock()?.stats)
    }

    /// Create every missing directory along `path` under the root `uri`.
    pub fn seed_directory(&self, uri: &str, path: &str) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        let mut current = *inner
            .roots
            .get(uri)
            .ok_or_else(|| StorageError::RootInaccessible(uri.to_string()))?;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let existing = inner.children(current)?.get(segment).copied();
            current = match existing {
                Some(id) => id,
                None => inner.insert(
                    Some(current),
                    segment,
                    NodeKind::Directory {
                        children: BTreeMap::new(),
                    },
                ),
            };
        }
        Ok(())
    }

    /// Place a file at `path` under the root `uri`, creating parents as needed.
    pub fn seed_file(&self, uri: &str, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        };
        self.seed_directory(uri, parent)?;

        let mut inner = self.lock()?;
        let root = *inner
            .roots
            .get(uri)
            .ok_or_else(|| StorageError::RootInaccessible(uri.to_string()))?;
        let dir = inner
            .lookup(root, parent)
            .ok_or_else(|| StorageError::InvalidHandle(parent.to_string()))?;
        inner.insert(
            Some(dir),
            name,
            NodeKind::File {
                mime_type: "application/octet-stream".to_string(),
                content: content.to_vec(),
            },
        );
        Ok(())
    }

    /// Content of the file at `path`, if it exists and is a file.
    pub fn read_file(&self, uri: &str, path: &str) -> Option<Vec<u8>> {
        let inner = self.inner.lock().ok()?;
        let id = inner.lookup(*inner.roots.get(uri)?, path)?;
        match &inner.nodes.get(&id)?.kind {
            NodeKind::File { content, .. } => Some(content.clone()),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Content type recorded when the file at `path` was created.
    pub fn mime_type(&self, uri: &str, path: &str) -> Option<String> {
        let inner = self.inner.lock().ok()?;
        let id = inner.lookup(*inner.roots.get(uri)?, path)?;
        match &inner.nodes.get(&id)?.kind {
            NodeKind::File { mime_type, .. } => Some(mime_type.clone()),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn is_directory(&self, uri: &str, path: &str) -> bool {
        let Ok(inner) = self.inner.lock() else {
            return false;
        };
        inner
            .roots
            .get(uri)
            .and_then(|root| inner.lookup(*root, path))
            .and_then(|id| inner.nodes.get(&id))
            .is_some_and(|node| matches!(node.kind, NodeKind::Directory { .. }))
    }

    pub fn exists(&self, uri: &str, path: &str) -> bool {
        let Ok(inner) = self.inner.lock() else {
            return false;
        };
        inner
            .roots
            .get(uri)
            .and_then(|root| inner.lookup(*root, path))
            .is_some()
    }

    /// Names directly under the directory at `path`, in sorted order.
    pub fn list(&self, uri: &str, path: &str) -> Vec<String> {
        let Ok(inner) = self.inner.lock() else {
            return Vec::new();
        };
        inner
            .roots
            .get(uri)
            .and_then(|root| inner.lookup(*root, path))
            .and_then(|id| inner.children(id).ok())
            .map(|children| children.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl TreeStorage for MemoryTree {
    type Handle = MemoryHandle;
    type Writer = MemoryWriter;

    fn resolve_root(&self, uri: &str) -> Result<MemoryHandle, StorageError> {
        self.lock()?
            .roots
            .get(uri)
            .map(|id| MemoryHandle(*id))
            .ok_or_else(|| StorageError::RootInaccessible(uri.to_string()))
    }

    fn find_child(
        &self,
        dir: &MemoryHandle,
        name: &str,
    ) -> Result<Option<ChildEntry<MemoryHandle>>, StorageError> {
        let inner = self.lock()?;
        let Some(id) = inner.children(dir.0)?.get(name).copied() else {
            return Ok(None);
        };
        match inner.nodes.get(&id).map(|node| &node.kind) {
            Some(NodeKind::Directory { .. }) => Ok(Some(ChildEntry::Directory(MemoryHandle(id)))),
            Some(NodeKind::File { .. }) => Ok(Some(ChildEntry::File(MemoryHandle(id)))),
            None => Ok(None),
        }
    }

    fn create_directory(
        &self,
        dir: &MemoryHandle,
        name: &str,
    ) -> Result<Option<MemoryHandle>, StorageError> {
        let mut inner = self.lock()?;
        if inner.faults.refuse_directory_creation || inner.children(dir.0)?.contains_key(name) {
            return Ok(None);
        }
        let id = inner.insert(
            Some(dir.0),
            name,
            NodeKind::Directory {
                children: BTreeMap::new(),
            },
        );
        inner.stats.directories_created += 1;
        debug!("Created directory node {} ({})", id, name);
        Ok(Some(MemoryHandle(id)))
    }

    fn create_file(
        &self,
        dir: &MemoryHandle,
        mime_type: &str,
        name: &str,
    ) -> Result<Option<MemoryHandle>, StorageError> {
        let mut inner = self.lock()?;
        if inner.faults.refuse_file_creation || inner.children(dir.0)?.contains_key(name) {
            return Ok(None);
        }
        let id = inner.insert(
            Some(dir.0),
            name,
            NodeKind::File {
                mime_type: mime_type.to_string(),
                content: Vec::new(),
            },
        );
        inner.stats.files_created += 1;
        debug!("Created file node {} ({}, {})", id, name, mime_type);
        Ok(Some(MemoryHandle(id)))
    }

    fn open_output_stream(&self, file: &MemoryHandle) -> Result<Option<MemoryWriter>, StorageError> {
        let mut inner = self.lock()?;
        if inner.faults.refuse_output_stream {
            return Ok(None);
        }
        match inner.nodes.get_mut(&file.0).map(|node| &mut node.kind) {
            Some(NodeKind::File { content, .. }) => content.clear(),
            Some(NodeKind::Directory { .. }) | None => return Ok(None),
        }
        inner.stats.streams_opened += 1;

        Ok(Some(MemoryWriter {
            inner: Arc::clone(&self.inner),
            node: file.0,
            buffer: Vec::new(),
        }))
    }

    fn delete_recursive(&self, dir: &MemoryHandle) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        if inner.faults.decline_delete {
            return Ok(false);
        }
        let Some(node) = inner.nodes.get(&dir.0) else {
            return Ok(true);
        };
        let parent = node.parent;
        let name = node.name.clone();

        match parent {
            Some(parent) => {
                if let Some(Node {
                    kind: NodeKind::Directory { children },
                    ..
                }) = inner.nodes.get_mut(&parent)
                {
                    children.remove(&name);
                }
            }
            None => {
                inner.roots.retain(|_, id| *id != dir.0);
            }
        }
        inner.remove_subtree(dir.0);
        inner.stats.deletes += 1;
        Ok(true)
    }
}

/// Buffered writer into a `MemoryTree` file; bytes become visible on flush.
#[derive(Debug)]
pub struct MemoryWriter {
    inner: Arc<Mutex<Inner>>,
    node: usize,
    buffer: Vec<u8>,
}

impl io::Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        match inner.nodes.get_mut(&self.node).map(|node| &mut node.kind) {
            Some(NodeKind::File { content, .. }) => {
                content.append(&mut self.buffer);
                Ok(())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "file removed while open",
            )),
        }
    }
}

impl Drop for MemoryWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}
