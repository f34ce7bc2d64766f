//! Interpreter Errors
//!
//! Every failure is non-fatal and local to one interpreter call. Errors are
//! returned as data next to the output; `Display` gives the message shown
//! to the user.

use thiserror::Error;

use crate::fs::PathError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// No node exists at the resolved path.
    #[error("{}", describe_missing(.command, .path))]
    PathNotFound { command: &'static str, path: String },

    /// A file was found where a directory was required.
    #[error("{command}: not a directory: {path}")]
    NotADirectory { command: &'static str, path: String },

    /// A directory was found where a file was required.
    #[error("{command}: {path}: Is a directory")]
    IsADirectory { command: &'static str, path: String },

    #[error("{command}: missing operand")]
    MissingOperand { command: &'static str },

    #[error("command not found: {name}")]
    UnknownCommand { name: String },
}

impl ShellError {
    /// Attach the failing command to a resolver error.
    pub fn from_path(command: &'static str, err: PathError) -> Self {
        match err {
            PathError::NotFound(path) => ShellError::PathNotFound { command, path },
            PathError::NotADirectory(path) => ShellError::NotADirectory { command, path },
        }
    }
}

fn describe_missing(command: &str, path: &str) -> String {
    match command {
        "cd" => format!("cd: path not found: {}", path),
        "ls" => format!("ls: cannot access '{}': No such file or directory", path),
        _ => format!("{}: {}: No such file or directory", command, path),
    }
}
