//! cd - change the working directory
//!
//! `cd` with no operand goes to `/home/user`. On any failure the working
//! directory is left as it was.

use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::interpreter::ShellError;

pub const HOME_DIR: &str = "/home/user";

pub struct CdCommand;

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> CommandOutcome {
        let target = ctx.args.first().map(String::as_str).unwrap_or(HOME_DIR);

        let resolved = match ctx.fs.resolve(ctx.cwd, target) {
            Ok(path) => path,
            Err(err) => return CommandOutcome::failure(ShellError::from_path("cd", err)),
        };

        match ctx.fs.lookup(&resolved) {
            Some(node) if node.is_directory() => CommandOutcome::change_dir(resolved),
            _ => CommandOutcome::failure(ShellError::NotADirectory {
                command: "cd",
                path: target.to_string(),
            }),
        }
    }
}
