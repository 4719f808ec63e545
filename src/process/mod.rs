//! External process execution
//!
//! This module separates spawning a process from interpreting its result:
//!
//! - [CommandExecutor]: raw execution, implemented by [system::SystemExecutor]
//!   for real processes and by [mock::MockExecutor] for tests
//! - [ProcessRunner]: turns raw outputs into trimmed text or a
//!   [ReleaseError], reporting failures before they propagate
//!
//! Arguments are always passed as separate argv entries, never through a
//! shell, so a commit message built from untrusted text stays one argument.

pub mod mock;
pub mod system;

pub use mock::{Invocation, MockExecutor, Mode};
pub use system::SystemExecutor;

use std::io;

use crate::error::{ReleaseError, Result};
use crate::ui::Reporter;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    /// Diagnostic text of a failed run: stderr, or stdout when stderr is empty.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Raw process execution
///
/// Implementations inherit the caller's working directory and must not
/// retry. A returned `io::Error` means the process could not be started.
pub trait CommandExecutor: Send + Sync {
    /// Runs `program` with piped output and waits for it to finish.
    fn capture(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;

    /// Runs `program` with inherited standard streams and returns its exit code.
    fn stream(&self, program: &str, args: &[String]) -> io::Result<Option<i32>>;
}

/// Interprets process results and reports failures.
pub struct ProcessRunner<'a> {
    executor: &'a dyn CommandExecutor,
    reporter: &'a dyn Reporter,
}

impl<'a> ProcessRunner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor, reporter: &'a dyn Reporter) -> Self {
        ProcessRunner { executor, reporter }
    }

    pub fn reporter(&self) -> &'a dyn Reporter {
        self.reporter
    }

    /// Runs a command and returns its trimmed standard output.
    ///
    /// # Returns
    /// * `Ok(String)` - Trimmed stdout when the process exits with code 0
    /// * `Err(ReleaseError::Command)` - Non-zero exit, carrying the trimmed diagnostic
    /// * `Err(ReleaseError::Spawn)` - The process could not be started
    pub fn run(&self, program: &str, args: &[String]) -> Result<String> {
        tracing::debug!(program, ?args, "running command");

        let output = self
            .executor
            .capture(program, args)
            .map_err(|source| self.spawn_failed(program, source))?;

        tracing::trace!(program, code = ?output.code, "command finished");

        if output.succeeded() {
            return Ok(output.stdout.trim().to_string());
        }

        let message = output.diagnostic();
        self.reporter.error(&format!(
            "Command '{}' failed with exit code {}: {}",
            program,
            describe_code(output.code),
            message
        ));
        Err(ReleaseError::Command {
            program: program.to_string(),
            code: output.code,
            message,
        })
    }

    /// Runs a command with its output streamed live to the terminal.
    pub fn run_streaming(&self, program: &str, args: &[String]) -> Result<()> {
        tracing::debug!(program, ?args, "running streamed command");

        let code = self
            .executor
            .stream(program, args)
            .map_err(|source| self.spawn_failed(program, source))?;

        tracing::trace!(program, ?code, "streamed command finished");

        if code == Some(0) {
            return Ok(());
        }

        let message = format!(
            "Command '{}' failed with exit code {}",
            program,
            describe_code(code)
        );
        self.reporter.error(&message);
        Err(ReleaseError::Command {
            program: program.to_string(),
            code,
            message,
        })
    }

    fn spawn_failed(&self, program: &str, source: io::Error) -> ReleaseError {
        let err = ReleaseError::Spawn {
            program: program.to_string(),
            source,
        };
        self.reporter.error(&err.to_string());
        err
    }
}

fn describe_code(code: Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "unknown (terminated by signal)".to_string())
}
