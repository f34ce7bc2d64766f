//! Interpreter Types

use std::sync::Arc;

use crate::fs::FileSystem;
use crate::interpreter::errors::ShellError;

/// Result of interpreting one command line.
///
/// `new_fs` is the snapshot the caller should adopt. Commands that do not
/// touch the tree return the very `Arc` they were given.
#[derive(Debug, Clone)]
pub struct Interpretation {
    /// Output text; may span lines and carry color markup.
    pub output: String,
    pub new_cwd: String,
    pub new_fs: Arc<FileSystem>,
    pub error: Option<ShellError>,
    /// Set by `clear`: the caller should wipe its scroll-back.
    pub clear: bool,
}

impl Interpretation {
    /// Nothing happened: no output, state unchanged.
    pub fn unchanged(cwd: &str, fs: &Arc<FileSystem>) -> Self {
        Self {
            output: String::new(),
            new_cwd: cwd.to_string(),
            new_fs: Arc::clone(fs),
            error: None,
            clear: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
