// src/commands/mod.rs
pub mod cat;
pub mod cd_cmd;
pub mod clear_cmd;
pub mod echo;
pub mod help_cmd;
pub mod ls;
pub mod pwd;
pub mod registry;
pub mod types;

pub use registry::{create_default_registry, CommandRegistry};
pub use types::{Command, CommandContext, CommandOutcome};
