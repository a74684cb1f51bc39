//! Domain error types.

/// Top-level error type for hypermanager.
#[derive(Debug, thiserror::Error)]
pub enum HypermanagerError {
    #[error("unknown parameter space: {0}")]
    UnknownSpace(String),

    #[error("duplicate parameter space: {0}")]
    DuplicateSpace(String),

    #[error("optimizer command carries no --spaces parameter")]
    SpacesMissing,

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error("results unavailable: {reason}")]
    ResultsUnavailable { reason: String },

    #[error("epoch {epoch}: missing required field `{field}`")]
    MissingField { epoch: usize, field: String },

    #[error("optimizer command failed ({status})")]
    CommandFailed { status: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&HypermanagerError> for std::process::ExitCode {
    fn from(err: &HypermanagerError) -> Self {
        let code: u8 = match err {
            HypermanagerError::Io(_) => 1,
            HypermanagerError::UnknownSpace(_)
            | HypermanagerError::DuplicateSpace(_)
            | HypermanagerError::SpacesMissing => 2,
            HypermanagerError::Store { .. } => 3,
            HypermanagerError::ResultsUnavailable { .. }
            | HypermanagerError::MissingField { .. } => 4,
            HypermanagerError::CommandFailed { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
