//! File System Module
//!
//! Virtual file system for the shell: a tree of files and directories held
//! in memory, plus the path resolver every command goes through.

pub mod path;
pub mod seed;
pub mod types;

pub use path::{join, lookup, normalize, resolve};
pub use seed::initial_file_system;
pub use types::*;
