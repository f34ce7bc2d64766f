use crate::commands::{Command, CommandContext, CommandOutcome};

/// Asks the caller to wipe its scroll-back; produces no text itself.
pub struct ClearCommand;

impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn execute(&self, _ctx: &CommandContext<'_>) -> CommandOutcome {
        CommandOutcome::clear_screen()
    }
}
