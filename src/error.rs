use thiserror::Error;

/// Unified error type for helleaser operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("{message}")]
    Command {
        program: String,
        code: Option<i32>,
        message: String,
    },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("You have uncommitted changes in your working directory.")]
    DirtyWorkingDirectory,

    #[error("Invalid version format '{0}'. Expected format: x.y.z")]
    InvalidVersion(String),

    #[error("Invalid option '{0}' selected. Please choose a valid option.")]
    InvalidChoice(String),

    #[error("No option selected: input ended before an answer was given.")]
    InputClosed,

    #[error("Invalid environment '{0}' specified. For more information, use --help.")]
    UnknownEnvironment(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in helleaser
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Failures detected by validation rather than by an external command.
    ///
    /// These are reported verbatim; everything else is reported as an
    /// unexpected workflow failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ReleaseError::DirtyWorkingDirectory
                | ReleaseError::InvalidVersion(_)
                | ReleaseError::InvalidChoice(_)
                | ReleaseError::InputClosed
                | ReleaseError::UnknownEnvironment(_)
        )
    }

    /// Process exit code for this failure. Every failure is terminal.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
