//! echo-shell - A simulated shell over an in-memory file system
//!
//! This library provides the command interpreter (`pwd`, `ls`, `cd`, `echo`,
//! `cat`, `help`, `clear`), the virtual file system it resolves paths
//! against, and the session layer that owns state between commands.

pub mod commands;
pub mod fs;
pub mod interpreter;
pub mod markup;
pub mod session;
pub mod settings;
pub mod suggest;

pub use fs::{FileSystem, Node, PathError};
pub use interpreter::{interpret, Interpretation, ShellError};
pub use session::{Session, SessionError, SessionOptions};
