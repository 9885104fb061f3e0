//! Core error types for pin-file handling and artifact resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a validation run.
///
/// Every variant is terminal: checks are deterministic configuration
/// checks, so nothing here is retried.
#[derive(Error, Debug)]
pub enum PinError {
    /// The pin file does not exist where it is required.
    #[error("No {} file found", path.display())]
    ConfigurationMissing { path: PathBuf },

    /// The pin file exists but could not be read.
    #[error("Error reading {} file: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One resolution unit failed; the whole collection is aborted.
    #[error("Error during resolution of the artifacts of {unit}: {source}")]
    ResolutionFailure {
        unit: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A pin pattern could not be turned into a matcher.
    #[error("Invalid pin pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A recommendation source (BOM) could not be loaded.
    #[error("Failed to load recommendations from {source_name}: {message}")]
    Recommendation {
        source_name: String,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PinError>;

impl PinError {
    /// Wraps a failure of a single resolution unit with the unit's name.
    pub fn resolution_failure(
        unit: impl Into<String>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ResolutionFailure {
            unit: unit.into(),
            source: Box::new(error),
        }
    }

    /// Returns true for errors caused by a missing pin file.
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing { .. })
    }
}
