//! Diagnostic logging for helleaser.
//!
//! User-facing progress goes through [`crate::ui::Reporter`]. This module only
//! wires `tracing` diagnostics (spawned commands, workflow transitions) to
//! stderr, filtered by the `HELLEASER_LOG` environment variable.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "HELLEASER_LOG";

/// Filter used when `HELLEASER_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from a directive such as `debug` or `helleaser=trace`.
///
/// Bare level names are scoped to this crate to keep dependency noise out.
pub fn filter_for(directive: Option<&str>) -> Result<EnvFilter> {
    let directive = match directive.map(str::trim) {
        None | Some("") => DEFAULT_FILTER.to_string(),
        Some(level) if is_bare_level(level) => format!("helleaser={}", level),
        Some(other) => other.to_string(),
    };
    EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid {} directive '{}'", LOG_ENV, directive))
}

fn is_bare_level(s: &str) -> bool {
    matches!(
        s.to_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}

/// Install the global subscriber.
///
/// Fails if the directive is invalid or a subscriber is already installed.
pub fn init_logging() -> Result<()> {
    let directive = std::env::var(LOG_ENV).ok();
    let filter = filter_for(directive.as_deref())?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
