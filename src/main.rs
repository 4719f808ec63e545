use std::process::ExitCode;

use clap::error::ErrorKind;

use helleaser::cli::{report_failure, run_release_workflow, Args};
use helleaser::config;
use helleaser::logging;
use helleaser::process::SystemExecutor;
use helleaser::ui::{ConsoleReporter, Reporter, StdinPrompt};

fn main() -> ExitCode {
    let args = match Args::parse_from_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    if args.version {
        println!("v{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let reporter = ConsoleReporter;

    if let Err(e) = logging::init_logging() {
        reporter.warn(&format!("{:#}", e));
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            reporter.error(&format!("Error loading config: {:#}", e));
            return ExitCode::from(1);
        }
    };

    let options = match args.into_options(&config) {
        Ok(options) => options,
        Err(e) => {
            report_failure(&reporter, &e);
            return ExitCode::from(e.exit_code());
        }
    };

    let mut prompt = StdinPrompt;
    match run_release_workflow(&options, &SystemExecutor, &mut prompt, &reporter) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "workflow finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure(&reporter, &e);
            ExitCode::from(e.exit_code())
        }
    }
}
