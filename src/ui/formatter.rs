//! Message formatting for console output.
//!
//! All user-facing messages go through a [`Reporter`] so the workflow can be
//! exercised in tests without touching the terminal.

use std::sync::Mutex;

use console::style;

/// Severity of an emitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Plain,
    Info,
    Step,
    Success,
    Warning,
    Error,
}

/// Sink for user-facing messages.
pub trait Reporter: Send + Sync {
    fn emit(&self, level: Level, message: &str);

    fn log(&self, indent: &str, message: &str) {
        self.emit(Level::Plain, &format!("{}{}", indent, message));
    }

    fn empty_line(&self) {
        self.emit(Level::Plain, "");
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn step(&self, message: &str) {
        self.emit(Level::Step, message);
    }

    fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}

/// Prints styled messages to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Render a message with its level marker, without printing it.
    pub fn render(level: Level, message: &str) -> String {
        match level {
            Level::Plain => message.to_string(),
            Level::Info => format!("{} {}", style("ℹ").cyan(), message),
            Level::Step => format!("{} {}", style("→").yellow(), style(message).bold()),
            Level::Success => format!("{} {}", style("✓").green(), message),
            Level::Warning => format!("{} {}", style("⚠ WARNING:").yellow(), message),
            Level::Error => format!("{} {}", style("ERROR:").red(), message),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, level: Level, message: &str) {
        let line = Self::render(level, message);
        match level {
            Level::Warning | Level::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

/// Records messages in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message emitted so far.
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Messages emitted at the given level.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at(level).iter().any(|m| m.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn emit(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}
