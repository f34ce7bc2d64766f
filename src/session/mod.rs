//! Session
//!
//! The caller side of the interpreter. A session owns the working
//! directory, the current file system snapshot, the transcript and the
//! command history, and threads them through every `interpret` call.

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::commands::cd_cmd::HOME_DIR;
use crate::fs::{initial_file_system, normalize, FileSystem};
use crate::interpreter::{interpret, Interpretation};
use crate::settings::{Settings, Theme};

/// Number of past commands sent along with a suggestion request.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("working directory does not exist: {0}")]
    MissingDirectory(String),

    #[error("working directory is not a directory: {0}")]
    NotADirectory(String),
}

/// Simulated execution delay, drawn uniformly from `[min, max)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Latency {
    pub range: Range<Duration>,
}

impl Latency {
    pub fn none() -> Self {
        Self { range: Duration::ZERO..Duration::ZERO }
    }

    pub fn fixed(delay: Duration) -> Self {
        Self { range: delay..delay }
    }

    fn sample(&self) -> Duration {
        if self.range.is_empty() {
            self.range.start
        } else {
            rand::thread_rng().gen_range(self.range.clone())
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self { range: Duration::from_millis(100)..Duration::from_millis(300) }
    }
}

/// Options for creating a session.
#[derive(Default)]
pub struct SessionOptions {
    /// Working directory (defaults to `/home/user`)
    pub cwd: Option<String>,
    /// File system snapshot (defaults to the seed tree)
    pub fs: Option<Arc<FileSystem>>,
    /// Display preferences
    pub settings: Option<Settings>,
    /// Simulated execution delay
    pub latency: Option<Latency>,
    /// Past commands included in suggestion requests
    pub history_window: Option<usize>,
}

/// A transient notice raised for a failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

pub struct Session {
    cwd: String,
    fs: Arc<FileSystem>,
    settings: Settings,
    latency: Latency,
    history_window: usize,
    transcript: Vec<String>,
    /// Most recent first.
    history: Vec<String>,
    /// Index into `history` while navigating, `None` at the live prompt.
    history_pointer: Option<usize>,
    notifications: Vec<Notification>,
}

impl Session {
    /// Create a session. The working directory is normalized against `/`
    /// and must name an existing directory in `fs`.
    pub fn new(options: SessionOptions) -> Result<Self, SessionError> {
        let fs = options.fs.unwrap_or_else(|| Arc::new(initial_file_system()));
        let cwd = normalize("/", options.cwd.as_deref().unwrap_or(HOME_DIR));

        match fs.lookup(&cwd) {
            None => return Err(SessionError::MissingDirectory(cwd)),
            Some(node) if !node.is_directory() => return Err(SessionError::NotADirectory(cwd)),
            Some(_) => {}
        }

        Ok(Self {
            cwd,
            fs,
            settings: options.settings.unwrap_or_default(),
            latency: options.latency.unwrap_or_default(),
            history_window: options.history_window.unwrap_or(DEFAULT_HISTORY_WINDOW),
            transcript: Vec::new(),
            history: Vec::new(),
            history_pointer: None,
            notifications: Vec::new(),
        })
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn fs(&self) -> &Arc<FileSystem> {
        &self.fs
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Lines shown so far (prompt echoes and command output).
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Submitted commands, most recent first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Prompt text for the current theme.
    pub fn prompt(&self) -> String {
        match self.settings.theme {
            Theme::EchoShell => format!("{}¶", self.cwd),
            Theme::Powershell => format!("PS {}¶", self.cwd.replace('/', "\\")),
        }
    }

    /// Submit one line.
    ///
    /// Returns `None` for a blank line, which is only echoed. `&mut self`
    /// serializes submissions: each one sees the state the previous left.
    pub async fn submit(&mut self, line: &str) -> Option<Interpretation> {
        if line.trim().is_empty() {
            self.transcript.push(format!("{} ", self.prompt()));
            return None;
        }
        self.transcript.push(format!("{} {}", self.prompt(), line));

        let delay = self.latency.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = interpret(line, &self.cwd, &self.fs);
        if result.clear {
            self.transcript.clear();
        } else {
            if let Some(error) = &result.error {
                info!(%error, "command error");
                self.notifications.push(Notification {
                    title: "Command Error".to_string(),
                    description: error.to_string(),
                });
            }
            self.transcript.extend(result.output.split('\n').map(String::from));
        }

        if result.new_cwd != self.cwd {
            debug!(from = %self.cwd, to = %result.new_cwd, "changing directory");
        }
        self.cwd = result.new_cwd.clone();
        self.fs = Arc::clone(&result.new_fs);

        self.history.insert(0, line.to_string());
        self.history_pointer = None;

        Some(result)
    }

    /// Step to an older history entry. `None` when there is no history.
    pub fn history_up(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let next = match self.history_pointer {
            None => 0,
            Some(i) => (i + 1).min(self.history.len() - 1),
        };
        self.history_pointer = Some(next);
        Some(self.history[next].as_str())
    }

    /// Step to a newer history entry; past the newest the input is empty.
    /// `None` when not navigating.
    pub fn history_down(&mut self) -> Option<&str> {
        let current = self.history_pointer?;
        if current == 0 {
            self.history_pointer = None;
            return Some("");
        }
        self.history_pointer = Some(current - 1);
        Some(self.history[current - 1].as_str())
    }

    /// The most recent `history_window` commands, oldest first.
    pub fn recent_history(&self) -> Vec<String> {
        self.history
            .iter()
            .take(self.history_window)
            .rev()
            .cloned()
            .collect()
    }

    /// Drain notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
