//! Git operations over the `git` executable
//!
//! [GitGateway] exposes the repository operations a release needs as single
//! calls. Multi-command operations are expressed as an ordered list of
//! [GitStep]s: each step runs only after the previous one succeeded, and the
//! first failure aborts the rest.

use crate::error::{ReleaseError, Result};
use crate::process::ProcessRunner;

/// One git invocation in a sequence, with an optional progress message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStep {
    pub announce: Option<String>,
    pub args: Vec<String>,
}

impl GitStep {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GitStep {
            announce: None,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn announced(mut self, message: impl Into<String>) -> Self {
        self.announce = Some(message.into());
        self
    }
}

/// Formats the release commit message.
pub fn commit_message(environment: &str, version: &str) -> String {
    format!("build({}): bump version to {}", environment, version)
}

/// Steps staging, committing and pushing a release.
pub fn commit_steps(environment: &str, version: &str) -> Vec<GitStep> {
    vec![
        GitStep::new(["add", "-A"]).announced("Adding changes to staging area..."),
        GitStep::new(["commit".to_string(), "-m".to_string(), commit_message(environment, version)])
            .announced("Committing changes..."),
        GitStep::new(["push"]).announced("Pushing changes to remote repository..."),
    ]
}

/// Steps merging `current` into `target` through `remote`, then returning to `current`.
pub fn merge_steps(remote: &str, current: &str, target: &str) -> Vec<GitStep> {
    vec![
        GitStep::new(["checkout", target]).announced(format!("Git checkout to branch {}...", target)),
        GitStep::new(["pull", remote, target]).announced("Merging changes..."),
        GitStep::new(["merge", current]),
        GitStep::new(["push", remote, target])
            .announced(format!("Pushing changes to remote branch {}...", target)),
        GitStep::new(["checkout", current]).announced(format!("Returning to branch {}...", current)),
    ]
}

/// Release-level git operations
pub struct GitGateway<'a> {
    runner: &'a ProcessRunner<'a>,
    program: String,
    remote: String,
}

impl<'a> GitGateway<'a> {
    /// Create a gateway running `program` (usually `git`) against `remote`
    pub fn new(runner: &'a ProcessRunner<'a>, program: impl Into<String>, remote: impl Into<String>) -> Self {
        GitGateway {
            runner,
            program: program.into(),
            remote: remote.into(),
        }
    }

    fn git<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.runner.run(&self.program, &args)
    }

    /// Runs steps in order, stopping at the first failure
    pub fn run_steps(&self, steps: Vec<GitStep>) -> Result<()> {
        for step in steps {
            if let Some(message) = &step.announce {
                self.runner.reporter().info(message);
            }
            self.runner.run(&self.program, &step.args)?;
        }
        Ok(())
    }

    /// Fails with [ReleaseError::DirtyWorkingDirectory] when `git status` lists any change
    pub fn check_working_directory(&self) -> Result<()> {
        self.runner.reporter().info("Checking working directory...");
        let status = self.git(["status", "--porcelain"])?;
        if status.lines().any(|line| !line.trim().is_empty()) {
            tracing::debug!(%status, "working directory has changes");
            return Err(ReleaseError::DirtyWorkingDirectory);
        }
        Ok(())
    }

    /// The checked-out branch name, empty when HEAD is detached
    pub fn current_branch(&self) -> Result<String> {
        self.git(["branch", "--show-current"])
    }

    /// Stages everything, commits the version bump and pushes to upstream
    pub fn commit_changes(&self, environment: &str, version: &str) -> Result<()> {
        let reporter = self.runner.reporter();
        reporter.empty_line();
        reporter.step(&format!("Starting commit process for {} environment...", environment));
        self.run_steps(commit_steps(environment, version))
    }

    /// Merges `current` into `target` and pushes it.
    ///
    /// A failure part way through leaves `target` checked out.
    pub fn merge_branch(&self, current: &str, target: &str) -> Result<()> {
        let reporter = self.runner.reporter();
        reporter.empty_line();
        reporter.step(&format!("Merging changes from {} to {}...", current, target));
        self.run_steps(merge_steps(&self.remote, current, target))
    }
}
