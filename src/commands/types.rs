// src/commands/types.rs
use std::sync::Arc;

use crate::fs::FileSystem;
use crate::interpreter::ShellError;

/// What one command produced.
///
/// `new_cwd` and `new_fs` are `None` when the command leaves them alone.
#[derive(Debug, Clone, Default)]
pub struct CommandOutcome {
    pub output: String,
    pub new_cwd: Option<String>,
    pub new_fs: Option<Arc<FileSystem>>,
    pub error: Option<ShellError>,
    pub clear: bool,
}

impl CommandOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self { output: output.into(), ..Default::default() }
    }

    /// Errors carry no output; the caller decides how to surface them.
    pub fn failure(error: ShellError) -> Self {
        Self { error: Some(error), ..Default::default() }
    }

    pub fn change_dir(cwd: String) -> Self {
        Self { new_cwd: Some(cwd), ..Default::default() }
    }

    pub fn clear_screen() -> Self {
        Self { clear: true, ..Default::default() }
    }
}

/// Borrowed inputs for one command invocation.
pub struct CommandContext<'a> {
    pub args: &'a [String],
    pub cwd: &'a str,
    pub fs: &'a Arc<FileSystem>,
}

/// A shell command. Commands are pure functions of their context.
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn execute(&self, ctx: &CommandContext<'_>) -> CommandOutcome;
}
