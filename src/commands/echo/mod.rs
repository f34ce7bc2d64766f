// src/commands/echo/mod.rs
use crate::commands::{Command, CommandContext, CommandOutcome};

pub struct EchoCommand;

impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> CommandOutcome {
        // No flags and no escapes: tokens come back joined by single spaces.
        CommandOutcome::success(ctx.args.join(" "))
    }
}
