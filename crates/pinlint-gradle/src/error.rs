//! Errors specific to Gradle lock state and BOM handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradleError {
    #[error("Failed to parse {file} at line {line}: {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Failed to parse BOM {file}: {message}")]
    InvalidBom { file: String, message: String },

    #[error("No dependency lock state found in {dir}")]
    MissingLockState { dir: String },

    #[error(transparent)]
    Core(#[from] pinlint_core::PinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GradleError>;

impl From<GradleError> for pinlint_core::PinError {
    fn from(err: GradleError) -> Self {
        match err {
            GradleError::Core(e) => e,
            GradleError::Io(e) => Self::Io(e),
            GradleError::InvalidBom { file, message } => Self::Recommendation {
                source_name: file,
                message,
            },
            other => Self::Io(std::io::Error::other(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinlint_core::PinError;

    #[test]
    fn test_parse_error_display() {
        let err = GradleError::ParseError {
            file: "gradle.lockfile".into(),
            line: 4,
            message: "expected 'group:name:version=configurations'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gradle.lockfile"));
        assert!(msg.contains("line 4"));
    }

    #[test]
    fn test_missing_lock_state_display() {
        let err = GradleError::MissingLockState { dir: "api".into() };
        assert_eq!(err.to_string(), "No dependency lock state found in api");
    }

    #[test]
    fn test_core_error_round_trip() {
        let core = PinError::ConfigurationMissing {
            path: "versions.props".into(),
        };
        let err: GradleError = core.into();
        assert!(matches!(err, GradleError::Core(_)));

        let back: PinError = err.into();
        assert!(back.is_configuration_missing());
    }

    #[test]
    fn test_invalid_bom_to_pin_error() {
        let err = GradleError::InvalidBom {
            file: "platform.pom".into(),
            message: "unexpected EOF".into(),
        };
        let pin_err: PinError = err.into();
        assert!(matches!(pin_err, PinError::Recommendation { .. }));
        assert!(pin_err.to_string().contains("platform.pom"));
    }

    #[test]
    fn test_parse_error_to_pin_error_keeps_message() {
        let err = GradleError::ParseError {
            file: "versions.lock".into(),
            line: 2,
            message: "bad line".into(),
        };
        let pin_err: PinError = err.into();
        assert!(pin_err.to_string().contains("versions.lock at line 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err: GradleError = io_err.into();
        assert!(matches!(err, GradleError::Io(_)));
        let pin_err: PinError = err.into();
        assert!(matches!(pin_err, PinError::Io(_)));
    }
}
