//! Errors surfaced by the pinlint command line.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LintError {
    #[error(transparent)]
    Pin(#[from] pinlint_core::PinError),

    #[error(transparent)]
    Gradle(#[from] pinlint_gradle::GradleError),

    #[error("Invalid configuration in {file}: {message}")]
    Config { file: String, message: String },

    /// One or more checks failed; carries every check's message.
    #[error("{message}")]
    Validation { message: String },

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LintError>;

impl LintError {
    pub fn config(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Process exit status: 1 for failed checks, 2 for anything fatal.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation { .. } => 1,
            _ => 2,
        }
    }
}
