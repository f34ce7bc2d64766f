// src/commands/pwd/mod.rs
use crate::commands::{Command, CommandContext, CommandOutcome};

pub struct PwdCommand;

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> CommandOutcome {
        // Arguments are ignored.
        CommandOutcome::success(ctx.cwd)
    }
}
