//! Bootstrap of the root pin file.
//!
//! Tools downstream expect a pin file at a stable location, so an empty one
//! is created when it is missing. Failing to create it is a degraded
//! outcome, not an error: a missing or empty file means zero pins.

use std::path::{Path, PathBuf};

/// Conventional pin file name at the build root.
pub const VERSIONS_PROPS: &str = "versions.props";

/// Outcome of [`ensure_pin_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// The pin file was already present.
    Existing(PathBuf),
    /// An empty pin file was created.
    Created(PathBuf),
    /// The pin file is missing and could not be created.
    Degraded { path: PathBuf, reason: String },
}

impl Bootstrap {
    pub fn path(&self) -> &Path {
        match self {
            Self::Existing(path) | Self::Created(path) | Self::Degraded { path, .. } => path,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Makes sure a pin file exists at `path`, creating an empty one if needed.
pub fn ensure_pin_file(path: &Path) -> Bootstrap {
    if path.is_file() {
        return Bootstrap::Existing(path.to_path_buf());
    }

    tracing::info!("Could not find '{}' file, creating...", path.display());

    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(_) => Bootstrap::Created(path.to_path_buf()),
        Err(e) => {
            tracing::warn!(
                "Unable to create empty {} file, please create this manually: {}",
                path.display(),
                e
            );
            Bootstrap::Degraded {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}
