//! Path resolution
//!
//! Turns a path string plus a current directory into a normalized absolute
//! path, then walks the tree to check that a node exists there.

use super::types::{FileSystem, Node, PathError};

/// Normalize `path` against `cwd` without touching the tree.
///
/// Absolute paths ignore `cwd`. Empty segments and `.` are dropped, `..` pops
/// one segment and is a no-op at the root.
pub fn normalize(cwd: &str, path: &str) -> String {
    let segments: Vec<&str> = if path.starts_with('/') {
        path.split('/').filter(|s| !s.is_empty()).collect()
    } else {
        cwd.split('/')
            .chain(path.split('/'))
            .filter(|s| !s.is_empty())
            .collect()
    };

    let mut resolved: Vec<&str> = Vec::new();
    for segment in segments {
        match segment {
            ".." => {
                resolved.pop();
            }
            "." => {}
            _ => resolved.push(segment),
        }
    }

    format!("/{}", resolved.join("/"))
}

/// Walk from the root through each segment of an absolute path.
///
/// Returns `None` on a missing segment or when a segment would descend
/// through a file.
pub fn lookup<'a>(fs: &'a FileSystem, path: &str) -> Option<&'a Node> {
    let mut current = fs.root();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = current.children()?.get(segment)?;
    }
    Some(current)
}

/// Resolve `path` relative to `cwd` to the normalized absolute path of an
/// existing node.
///
/// A trailing `/` asserts directory intent: it fails with
/// [`PathError::NotADirectory`] when the node is a file. Errors carry `path`
/// as the user typed it.
pub fn resolve(cwd: &str, path: &str, fs: &FileSystem) -> Result<String, PathError> {
    let resolved = normalize(cwd, path);
    let node = lookup(fs, &resolved).ok_or_else(|| PathError::NotFound(path.to_string()))?;

    if node.is_file() && path.ends_with('/') {
        return Err(PathError::NotADirectory(path.to_string()));
    }

    Ok(resolved)
}

/// Join a directory path and a child name.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}
