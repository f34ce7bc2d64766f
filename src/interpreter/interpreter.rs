//! Interpreter - command dispatch
//!
//! `interpret` is a pure function of the line, the working directory and
//! the file system snapshot. The caller owns that state and adopts whatever
//! comes back; nothing is retained between calls.

use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::debug;

use crate::commands::{create_default_registry, CommandContext, CommandRegistry};
use crate::fs::FileSystem;
use crate::interpreter::errors::ShellError;
use crate::interpreter::parse::parse_line;
use crate::interpreter::types::Interpretation;
use crate::markup::{paint, RED};

lazy_static! {
    static ref DEFAULT_REGISTRY: CommandRegistry = create_default_registry();
}

/// The registry holding every built-in command.
pub fn default_registry() -> &'static CommandRegistry {
    &DEFAULT_REGISTRY
}

/// Interpret `line` with the built-in commands.
pub fn interpret(line: &str, cwd: &str, fs: &Arc<FileSystem>) -> Interpretation {
    interpret_with(&DEFAULT_REGISTRY, line, cwd, fs)
}

/// Interpret `line` with the commands in `registry`.
pub fn interpret_with(
    registry: &CommandRegistry,
    line: &str,
    cwd: &str,
    fs: &Arc<FileSystem>,
) -> Interpretation {
    let Some(parsed) = parse_line(line) else {
        return Interpretation::unchanged(cwd, fs);
    };
    debug!(command = %parsed.name, cwd, "interpreting");

    let Some(command) = registry.get(&parsed.name) else {
        let error = ShellError::UnknownCommand { name: parsed.name };
        debug!(%error, "unknown command");
        return Interpretation {
            output: paint(RED, &error.to_string()),
            error: Some(error),
            ..Interpretation::unchanged(cwd, fs)
        };
    };

    let ctx = CommandContext { args: &parsed.args, cwd, fs };
    let outcome = command.execute(&ctx);
    if let Some(error) = &outcome.error {
        debug!(%error, "command failed");
    }

    Interpretation {
        output: outcome.output,
        new_cwd: outcome.new_cwd.unwrap_or_else(|| cwd.to_string()),
        new_fs: outcome.new_fs.unwrap_or_else(|| Arc::clone(fs)),
        error: outcome.error,
        clear: outcome.clear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CommandOutcome};
    use crate::fs::initial_file_system;

    fn seed() -> Arc<FileSystem> {
        Arc::new(initial_file_system())
    }

    #[test]
    fn test_empty_line() {
        let fs = seed();
        for line in ["", "   ", "\t"] {
            let result = interpret(line, "/home/user", &fs);
            assert_eq!(result.output, "");
            assert!(result.error.is_none());
            assert_eq!(result.new_cwd, "/home/user");
            assert!(Arc::ptr_eq(&result.new_fs, &fs));
        }
    }

    #[test]
    fn test_pwd() {
        let fs = seed();
        assert_eq!(interpret("pwd", "/home/user", &fs).output, "/home/user");
    }

    #[test]
    fn test_echo() {
        let fs = seed();
        let result = interpret("echo a b c", "/", &fs);
        assert_eq!(result.output, "a b c");
        assert!(!result.is_error());
    }

    #[test]
    fn test_ls_documents() {
        let fs = seed();
        let result = interpret("ls", "/home/user/documents", &fs);
        assert_eq!(result.output, "notes.txt\nplan.md");
    }

    #[test]
    fn test_ls_ignores_operands() {
        let fs = seed();
        let result = interpret("ls foo", "/home/user/documents", &fs);
        assert_eq!(result.output, "notes.txt\nplan.md");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_cd_uses_first_operand() {
        let fs = seed();
        let result = interpret("cd documents projects", "/home/user", &fs);
        assert_eq!(result.new_cwd, "/home/user/documents");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_cd_success() {
        let fs = seed();
        let result = interpret("cd projects/echo-shell", "/home/user", &fs);
        assert_eq!(result.new_cwd, "/home/user/projects/echo-shell");
        assert_eq!(result.output, "");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_cd_failure_keeps_cwd() {
        let fs = seed();
        let result = interpret("cd /no/such/path", "/home/user/documents", &fs);
        assert_eq!(result.new_cwd, "/home/user/documents");
        assert!(matches!(result.error, Some(ShellError::PathNotFound { .. })));
    }

    #[test]
    fn test_cd_then_ls_round() {
        let fs = seed();
        let first = interpret("cd ..", "/home/user/documents", &fs);
        let second = interpret("ls", &first.new_cwd, &first.new_fs);
        assert!(second.output.contains("welcome.txt"));
    }

    #[test]
    fn test_cat_directory() {
        let fs = seed();
        let result = interpret("cat documents", "/home/user", &fs);
        assert_eq!(result.output, "");
        assert!(matches!(result.error, Some(ShellError::IsADirectory { .. })));
    }

    #[test]
    fn test_unknown_command() {
        let fs = seed();
        let result = interpret("bogus --flag", "/home/user", &fs);
        assert_eq!(result.error, Some(ShellError::UnknownCommand { name: "bogus".to_string() }));
        assert!(result.output.contains("command not found: bogus"));
        assert_eq!(result.output, "\x1b[31mcommand not found: bogus\x1b[0m");
        assert_eq!(result.new_cwd, "/home/user");
    }

    #[test]
    fn test_clear_flag() {
        let fs = seed();
        let result = interpret("clear", "/", &fs);
        assert!(result.clear);
        assert_eq!(result.output, "");
    }

    #[test]
    fn test_fs_reference_preserved() {
        let fs = seed();
        for line in ["pwd", "ls", "cd documents", "cat welcome.txt", "help", "nope"] {
            let result = interpret(line, "/home/user", &fs);
            assert!(Arc::ptr_eq(&result.new_fs, &fs), "{}", line);
        }
    }

    struct TouchCommand;

    impl Command for TouchCommand {
        fn name(&self) -> &'static str {
            "touch"
        }

        fn execute(&self, ctx: &CommandContext<'_>) -> CommandOutcome {
            let mut fs = FileSystem::clone(ctx.fs);
            let path = crate::fs::normalize(ctx.cwd, &ctx.args[0]);
            fs.insert_file(&path, "").unwrap();
            CommandOutcome { new_fs: Some(Arc::new(fs)), ..Default::default() }
        }
    }

    #[test]
    fn test_mutating_command_replaces_snapshot() {
        let mut registry = create_default_registry();
        registry.register(Box::new(TouchCommand));
        let fs = seed();

        let result = interpret_with(&registry, "touch new.txt", "/home/user", &fs);
        assert!(!Arc::ptr_eq(&result.new_fs, &fs));
        assert!(result.new_fs.lookup("/home/user/new.txt").is_some());
        assert!(fs.lookup("/home/user/new.txt").is_none());
    }
}
