// src/commands/cat/mod.rs
use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::fs::Node;
use crate::interpreter::ShellError;

pub struct CatCommand;

impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> CommandOutcome {
        // Only the first operand is read.
        let Some(target) = ctx.args.first() else {
            return CommandOutcome::failure(ShellError::MissingOperand { command: "cat" });
        };

        let resolved = match ctx.fs.resolve(ctx.cwd, target) {
            Ok(path) => path,
            Err(err) => return CommandOutcome::failure(ShellError::from_path("cat", err)),
        };

        match ctx.fs.lookup(&resolved) {
            Some(Node::File { content }) => CommandOutcome::success(content.as_str()),
            Some(Node::Directory { .. }) => CommandOutcome::failure(ShellError::IsADirectory {
                command: "cat",
                path: target.clone(),
            }),
            None => CommandOutcome::failure(ShellError::PathNotFound {
                command: "cat",
                path: target.clone(),
            }),
        }
    }
}
