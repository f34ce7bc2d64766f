use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::markup::{paint, BRIGHT_CYAN, BRIGHT_YELLOW};

pub struct HelpCommand;

const HEADING: &str = "Echo Shell - Available Commands:";

const ENTRIES: &[(&str, &str)] = &[
    ("pwd", "Print name of current/working directory"),
    ("ls", "List directory contents"),
    ("cd [path]", "Change the working directory"),
    ("echo [text]", "Display a line of text"),
    ("cat [file]", "Concatenate and display files"),
    ("clear", "Clear the terminal screen"),
    ("help", "Display this help message"),
];

impl Command for HelpCommand {
    fn name(&self) -> &'static str { "help" }

    fn execute(&self, _ctx: &CommandContext<'_>) -> CommandOutcome {
        let width = ENTRIES.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);

        let mut lines = vec![paint(BRIGHT_CYAN, HEADING)];
        for (usage, description) in ENTRIES {
            let pad = " ".repeat(width - usage.len());
            lines.push(format!("  {}{}   - {}", paint(BRIGHT_YELLOW, usage), pad, description));
        }

        CommandOutcome::success(lines.join("\n"))
    }
}
