// src/commands/ls/mod.rs
use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::interpreter::ShellError;
use crate::markup::{paint, BLUE};

pub struct LsCommand;

impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> CommandOutcome {
        // Lists the current directory only; operands are ignored.
        let Some(children) = ctx.fs.lookup(ctx.cwd).and_then(|node| node.children()) else {
            return CommandOutcome::failure(ShellError::PathNotFound {
                command: "ls",
                path: ctx.cwd.to_string(),
            });
        };

        let listing: Vec<String> = children
            .iter()
            .map(|(name, child)| {
                if child.is_directory() {
                    paint(BLUE, &format!("{}/", name))
                } else {
                    name.clone()
                }
            })
            .collect();

        CommandOutcome::success(listing.join("\n"))
    }
}
