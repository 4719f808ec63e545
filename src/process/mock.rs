use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::Mutex;

use crate::process::{CommandExecutor, CommandOutput};

/// How a command was executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Captured,
    Streamed,
}

/// A recorded command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub mode: Mode,
}

impl Invocation {
    /// Program and arguments joined by single spaces.
    pub fn command_line(&self) -> String {
        command_line(&self.program, &self.args)
    }
}

/// Mock executor for testing without spawning processes
///
/// Responses are scripted per command line and consumed in order; a command
/// with no scripted response succeeds with empty output.
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    unspawnable: Mutex<HashSet<String>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl MockExecutor {
    /// Create a new mock where every command succeeds silently
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output for the next run of `command_line`
    pub fn respond(&self, command_line: impl Into<String>, output: CommandOutput) {
        if let Ok(mut responses) = self.responses.lock() {
            responses
                .entry(command_line.into())
                .or_default()
                .push_back(output);
        }
    }

    /// Make every run of `program` fail as if the executable were missing
    pub fn fail_to_spawn(&self, program: impl Into<String>) {
        if let Ok(mut unspawnable) = self.unspawnable.lock() {
            unspawnable.insert(program.into());
        }
    }

    /// Every invocation so far, in execution order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|invocations| invocations.clone())
            .unwrap_or_default()
    }

    /// Command lines of every invocation so far, in execution order
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }

    fn execute(&self, program: &str, args: &[String], mode: Mode) -> io::Result<CommandOutput> {
        if let Ok(mut invocations) = self.invocations.lock() {
            invocations.push(Invocation {
                program: program.to_string(),
                args: args.to_vec(),
                mode,
            });
        }

        let unspawnable = self
            .unspawnable
            .lock()
            .map(|set| set.contains(program))
            .unwrap_or(false);
        if unspawnable {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", program),
            ));
        }

        let scripted = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| {
                responses
                    .get_mut(&command_line(program, args))
                    .and_then(VecDeque::pop_front)
            });
        Ok(scripted.unwrap_or_else(|| CommandOutput::success("")))
    }
}

impl CommandExecutor for MockExecutor {
    fn capture(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        self.execute(program, args, Mode::Captured)
    }

    fn stream(&self, program: &str, args: &[String]) -> io::Result<Option<i32>> {
        self.execute(program, args, Mode::Streamed)
            .map(|output| output.code)
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
