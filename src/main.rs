use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use echo_shell::fs::FileSystem;
use echo_shell::markup;
use echo_shell::session::{Latency, Session, SessionOptions};
use echo_shell::settings::SettingsStore;
use echo_shell::suggest::{LocalProvider, SuggestionFetcher};

#[derive(Parser)]
#[command(name = "echo-shell")]
#[command(about = "A simulated shell over an in-memory file system")]
#[command(version)]
#[command(after_help = "Without -c, lines are read from stdin. Type `exit` to quit \
(a REPL keyword, not a shell command) and `?<text>` to list suggestions.")]
struct Cli {
    /// Run a single command line and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Starting working directory
    #[arg(long = "cwd")]
    cwd: Option<String>,

    /// Load the file system tree from a JSON file instead of the seed tree
    #[arg(long = "fs")]
    fs: Option<PathBuf>,

    /// Output results as JSON (output, cwd, error)
    #[arg(long = "json")]
    json: bool,

    /// Strip color markup from output
    #[arg(long = "plain")]
    plain: bool,

    /// Directory holding persisted display settings
    #[arg(long = "settings-dir")]
    settings_dir: Option<PathBuf>,

    /// Fixed simulated execution delay in milliseconds (default: random 100-300)
    #[arg(long = "latency-ms")]
    latency_ms: Option<u64>,

    /// Print suggestions for the given input and exit
    #[arg(long = "suggest")]
    suggest: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let fs = match &cli.fs {
        Some(path) => match load_tree(path) {
            Ok(fs) => Some(Arc::new(fs)),
            Err(e) => {
                eprintln!("Error: Cannot load file system: {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let settings = cli.settings_dir.as_ref().map(|dir| SettingsStore::new(dir).load());
    let latency = match cli.latency_ms {
        Some(ms) => Some(Latency::fixed(Duration::from_millis(ms))),
        // One-shot runs skip the artificial delay.
        None if cli.command.is_some() => Some(Latency::none()),
        None => None,
    };

    let mut session = match Session::new(SessionOptions {
        cwd: cli.cwd.clone(),
        fs,
        settings,
        latency,
        history_window: None,
    }) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut fetcher = SuggestionFetcher::new(Arc::new(LocalProvider::builtin()))
        .with_debounce(Duration::ZERO);

    if let Some(input) = &cli.suggest {
        for suggestion in suggestions(&mut fetcher, input, session.recent_history()).await {
            println!("{}", suggestion);
        }
        return;
    }

    if let Some(line) = &cli.command {
        let failed = run_line(&mut session, line, &cli).await;
        std::process::exit(if failed { 1 } else { 0 });
    }

    let interactive = std::io::stdin().is_terminal();
    info!(interactive, "starting session");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{} ", render(&session.prompt(), cli.plain));
            let _ = std::io::stdout().flush();
        }
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if line.trim() == "exit" {
            break;
        }
        if let Some(input) = line.strip_prefix('?') {
            let found = suggestions(&mut fetcher, input, session.recent_history()).await;
            println!("{}", found.join("  "));
            continue;
        }
        run_line(&mut session, &line, &cli).await;
    }
}

fn load_tree(path: &Path) -> Result<FileSystem, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(FileSystem::from_json(&raw)?)
}

async fn suggestions(fetcher: &mut SuggestionFetcher, input: &str, history: Vec<String>) -> Vec<String> {
    fetcher.schedule(input, history);
    fetcher.settle().await;
    fetcher.latest().await
}

/// Submit one line and print what it produced. Returns true on error.
async fn run_line(session: &mut Session, line: &str, cli: &Cli) -> bool {
    let Some(result) = session.submit(line).await else {
        return false;
    };
    let notes = session.take_notifications();

    if cli.json {
        println!("{}", serde_json::json!({
            "output": result.output,
            "cwd": result.new_cwd,
            "error": result.error.as_ref().map(|e| e.to_string()),
        }));
        return result.is_error();
    }

    if result.clear {
        // ANSI escape sequence to clear screen and move cursor to top-left
        print!("\x1B[2J\x1B[H");
        let _ = std::io::stdout().flush();
    } else if !result.output.is_empty() {
        println!("{}", render(&result.output, cli.plain));
    }

    for note in notes {
        // Unknown commands already show their error in the output.
        if result.output.is_empty() {
            eprintln!("{}: {}", note.title, note.description);
        }
    }

    result.is_error()
}

fn render(text: &str, plain: bool) -> String {
    if plain {
        markup::strip(text)
    } else {
        text.to_string()
    }
}
