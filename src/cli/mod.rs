//! Command-line surface and the release workflow it drives.

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{
    report_failure, run_release_workflow, ReleaseOptions, ReleaseOutcome, ReleaseWorkflow,
};
