//! File System Types
//!
//! Core types for the virtual file system tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving a path against the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path not found: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),
}

/// Errors raised while building or loading a tree.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("root node must be a directory")]
    RootNotDirectory,

    #[error("invalid entry name '{name}': names must be non-empty and contain no '/'")]
    InvalidName { name: String },

    #[error("ENOTDIR: not a directory, {operation} '{path}'")]
    NotDirectory { path: String, operation: String },

    #[error("invalid file system json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A node of the tree: a file holding text, or a directory of named children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File {
        content: String,
    },
    Directory {
        #[serde(default)]
        children: IndexMap<String, Node>,
    },
}

impl Node {
    /// Create a file node.
    pub fn file(content: impl Into<String>) -> Self {
        Node::File { content: content.into() }
    }

    /// Create an empty directory node.
    pub fn directory() -> Self {
        Node::Directory { children: IndexMap::new() }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    /// Children of a directory, `None` for files.
    pub fn children(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Directory { children } => Some(children),
            Node::File { .. } => None,
        }
    }

    /// Content of a file, `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match self {
            Node::File { content } => Some(content),
            Node::Directory { .. } => None,
        }
    }

    fn validate(&self) -> Result<(), FsError> {
        if let Node::Directory { children } = self {
            for (name, child) in children {
                if !is_valid_name(name) {
                    return Err(FsError::InvalidName { name: name.clone() });
                }
                child.validate()?;
            }
        }
        Ok(())
    }
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/')
}

/// A virtual file system: a single root directory, conventionally `/`.
///
/// Sessions share snapshots as `Arc<FileSystem>`; a command that leaves the
/// tree untouched hands back the same `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Node", into = "Node")]
pub struct FileSystem {
    root: Node,
}

impl FileSystem {
    /// Create a file system with an empty root directory.
    pub fn new() -> Self {
        Self { root: Node::directory() }
    }

    /// Parse a tree from its JSON form (`{"type":"directory","children":{..}}`).
    pub fn from_json(json: &str) -> Result<Self, FsError> {
        let root: Node = serde_json::from_str(json)?;
        Self::try_from(root)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.root).unwrap_or_default()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Look up a normalized absolute path.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        super::path::lookup(self, path)
    }

    /// Resolve `path` against `cwd` to a normalized absolute path of an existing node.
    pub fn resolve(&self, cwd: &str, path: &str) -> Result<String, PathError> {
        super::path::resolve(cwd, path, self)
    }

    /// Insert `node` at the absolute `path`, creating missing parent directories.
    ///
    /// Used to build seed trees; no shell command mutates the tree.
    pub fn insert(&mut self, path: &str, node: Node) -> Result<(), FsError> {
        node.validate()?;
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((name, parents)) = segments.split_last() else {
            return match node {
                Node::Directory { .. } => {
                    self.root = node;
                    Ok(())
                }
                Node::File { .. } => Err(FsError::RootNotDirectory),
            };
        };

        let mut current = &mut self.root;
        let mut walked = String::new();
        for segment in parents {
            walked.push('/');
            walked.push_str(segment);
            let Node::Directory { children } = current else {
                return Err(FsError::NotDirectory { path: walked, operation: "insert".to_string() });
            };
            current = children
                .entry(segment.to_string())
                .or_insert_with(Node::directory);
        }

        match current {
            Node::Directory { children } => {
                children.insert(name.to_string(), node);
                Ok(())
            }
            Node::File { .. } => Err(FsError::NotDirectory {
                path: path.to_string(),
                operation: "insert".to_string(),
            }),
        }
    }

    /// Convenience wrapper over [`FileSystem::insert`] for files.
    pub fn insert_file(&mut self, path: &str, content: impl Into<String>) -> Result<(), FsError> {
        self.insert(path, Node::file(content))
    }

    /// Convenience wrapper over [`FileSystem::insert`] for empty directories.
    pub fn insert_dir(&mut self, path: &str) -> Result<(), FsError> {
        self.insert(path, Node::directory())
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Node> for FileSystem {
    type Error = FsError;

    fn try_from(root: Node) -> Result<Self, Self::Error> {
        if !root.is_directory() {
            return Err(FsError::RootNotDirectory);
        }
        root.validate()?;
        Ok(Self { root })
    }
}

impl From<FileSystem> for Node {
    fn from(fs: FileSystem) -> Self {
        fs.root
    }
}

// ============================================================================
// Tests
// ============================================================================
