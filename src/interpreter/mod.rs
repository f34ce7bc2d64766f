//! Interpreter module
//!
//! Parses a command line and dispatches it to the registered commands.

pub mod errors;
pub mod interpreter;
pub mod parse;
pub mod types;

pub use errors::ShellError;
pub use interpreter::{default_registry, interpret, interpret_with};
pub use parse::{parse_line, CommandLine};
pub use types::Interpretation;
