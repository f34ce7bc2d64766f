//! Command line parsing
//!
//! A line is split on runs of whitespace. There is no quoting or escaping,
//! so an argument can never contain a space.

/// A parsed command line: the command name and its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

/// Parse a raw input line. Returns `None` for an empty or blank line.
pub fn parse_line(line: &str) -> Option<CommandLine> {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    Some(CommandLine { name, args: tokens.collect() })
}
