//! Main release workflow orchestration logic
//!
//! The workflow runs once per invocation, strictly in order:
//! clean-directory gate, environment selection, then for staging the version
//! selection, manifest write, build, commit and optional merge. Every failure
//! is returned to the caller; nothing here terminates the process.

use std::path::PathBuf;

use crate::environment::Environment;
use crate::error::{ReleaseError, Result};
use crate::git::GitGateway;
use crate::manifest::{LineEnding, Manifest};
use crate::process::{CommandExecutor, ProcessRunner};
use crate::ui::{Prompt, Reporter};
use crate::version::{candidates_for, Version, VersionCandidates};

/// Question asked when choosing the next version.
pub const CHOICE_PROMPT: &str = "    Choose an option (1-3): ";

/// Settings for one release run, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOptions {
    pub environment: Environment,

    /// Branch merged into after the release commit
    pub merge_target: Option<String>,

    /// Package manager executable, run as `<package_manager> run <build_script>`
    pub package_manager: String,
    pub build_script: String,

    pub manifest_path: PathBuf,
    pub line_ending: LineEnding,

    pub git_program: String,
    pub remote: String,

    /// Release the manifest's current version without prompting
    pub skip_version: bool,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        ReleaseOptions {
            environment: Environment::Production,
            merge_target: None,
            package_manager: "npm".to_string(),
            build_script: "build".to_string(),
            manifest_path: PathBuf::from("package.json"),
            line_ending: LineEnding::native(),
            git_program: "git".to_string(),
            remote: "origin".to_string(),
            skip_version: false,
        }
    }
}

/// Result of a workflow that ran to completion
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// A staging release finished
    Released {
        version: String,
        /// Branch the release was committed on, `None` when no branch was checked out
        branch: Option<String>,
        merged_into: Option<String>,
    },

    /// The environment has no release workflow yet
    Unsupported { environment: Environment },
}

/// Maps a prompt answer to a candidate.
///
/// Blank input selects option 1. Anything that is not a number between 1
/// and 3 is an [`ReleaseError::InvalidChoice`].
pub fn resolve_choice(answer: &str, candidates: &VersionCandidates) -> Result<Version> {
    let option = answer.trim();
    if option.is_empty() {
        return Ok(candidates.patch);
    }

    option
        .parse::<usize>()
        .ok()
        .and_then(|number| candidates.option(number))
        .ok_or_else(|| ReleaseError::InvalidChoice(option.to_string()))
}

/// Reports a workflow failure the way the top-level handler should.
pub fn report_failure(reporter: &dyn Reporter, err: &ReleaseError) {
    if err.is_precondition() {
        reporter.error(&err.to_string());
        if matches!(err, ReleaseError::DirtyWorkingDirectory) {
            reporter.warn("Please commit or stash your changes before running the release process.");
        }
    } else {
        reporter.error(&format!("An error occurred while running the CLI: {}", err));
    }
}

/// One release run over injected process, prompt and output collaborators
pub struct ReleaseWorkflow<'a> {
    options: &'a ReleaseOptions,
    runner: ProcessRunner<'a>,
    prompt: &'a mut dyn Prompt,
}

impl<'a> ReleaseWorkflow<'a> {
    pub fn new(
        options: &'a ReleaseOptions,
        executor: &'a dyn CommandExecutor,
        prompt: &'a mut dyn Prompt,
        reporter: &'a dyn Reporter,
    ) -> Self {
        ReleaseWorkflow {
            options,
            runner: ProcessRunner::new(executor, reporter),
            prompt,
        }
    }

    fn reporter(&self) -> &'a dyn Reporter {
        self.runner.reporter()
    }

    fn git(&self) -> GitGateway<'_> {
        GitGateway::new(&self.runner, &self.options.git_program, &self.options.remote)
    }

    /// Runs the workflow to completion or to the first failure.
    pub fn run(&mut self) -> Result<ReleaseOutcome> {
        self.git().check_working_directory()?;

        tracing::debug!(environment = %self.options.environment, "environment selected");
        match self.options.environment {
            Environment::Production => {
                self.reporter()
                    .warn("Production environment is not supported yet.");
                Ok(ReleaseOutcome::Unsupported {
                    environment: Environment::Production,
                })
            }
            Environment::Staging => self.release(Environment::Staging),
        }
    }

    fn release(&mut self, environment: Environment) -> Result<ReleaseOutcome> {
        let reporter = self.reporter();
        reporter.empty_line();
        reporter.info(&format!("Running for {} environment...", environment));
        if let Some(target) = &self.options.merge_target {
            reporter.info(&format!(
                "Automatically merging changes into branch: {}",
                target
            ));
        }

        let mut manifest = Manifest::load(&self.options.manifest_path)?;
        let current = manifest.version()?.to_string();

        let version = if self.options.skip_version {
            Version::parse(&current)?;
            reporter.empty_line();
            reporter.info(&format!(
                "Skipping version bump, releasing current version {}",
                current
            ));
            current
        } else {
            let next = self.select_version(&current)?.to_string();
            reporter.info(&format!("Updating version from {} to {}", current, next));
            manifest.set_version(&next)?;
            manifest.save(self.options.line_ending)?;
            next
        };

        self.build()?;

        let git = self.git();
        let branch = git.current_branch()?;
        let mut merged_into = None;
        if branch.is_empty() {
            reporter.warn("No branch is checked out, skipping commit and merge.");
        } else {
            git.commit_changes(environment.name(), &version)?;
            if let Some(target) = &self.options.merge_target {
                git.merge_branch(&branch, target)?;
                merged_into = Some(target.clone());
            }
        }

        reporter.empty_line();
        reporter.success(&format!(
            "Completed the release process for version {}",
            version
        ));

        Ok(ReleaseOutcome::Released {
            version,
            branch: (!branch.is_empty()).then_some(branch),
            merged_into,
        })
    }

    fn select_version(&mut self, current: &str) -> Result<Version> {
        let reporter = self.reporter();
        reporter.empty_line();
        reporter.info(&format!("Current version: {}", current));

        let candidates = candidates_for(current)?;
        reporter.step("Choose a new version for the release:");
        for (index, (bump, candidate)) in candidates.entries().iter().enumerate() {
            let marker = if index == 0 { " [default]" } else { "" };
            reporter.log(
                "     ",
                &format!("{}. {}: {}{}", index + 1, bump.label(), candidate, marker),
            );
        }

        let answer = self.prompt.ask(CHOICE_PROMPT)?;
        tracing::debug!(%answer, "version choice read");
        resolve_choice(&answer, &candidates)
    }

    fn build(&self) -> Result<()> {
        let reporter = self.reporter();
        reporter.empty_line();
        reporter.step("Building the project...");

        let args = vec!["run".to_string(), self.options.build_script.clone()];
        self.runner
            .run_streaming(&self.options.package_manager, &args)?;

        reporter.success("Build process completed successfully.");
        Ok(())
    }
}

/// Runs one release workflow.
///
/// # Returns
/// * `Ok(ReleaseOutcome)` - The workflow completed or the environment was skipped
/// * `Err(ReleaseError)` - The first failure; the caller reports it and exits with
///   [`ReleaseError::exit_code`]
pub fn run_release_workflow(
    options: &ReleaseOptions,
    executor: &dyn CommandExecutor,
    prompt: &mut dyn Prompt,
    reporter: &dyn Reporter,
) -> Result<ReleaseOutcome> {
    ReleaseWorkflow::new(options, executor, prompt, reporter).run()
}
