pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod process;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
