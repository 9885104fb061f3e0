//! `pinlint.toml` configuration.
//!
//! Every key is optional; a missing file means defaults. Relative paths are
//! resolved against the build root by the pipeline.
//!
//! ```toml
//! pin-file = "versions.props"
//! create-missing = true
//! boms = ["boms/platform.pom"]
//! checks = ["unused", "bom-conflict"]
//! ```

use crate::error::{LintError, Result};
use pinlint_core::VERSIONS_PROPS;
use pinlint_core::check::CheckKind;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item};

/// Default configuration file name at the build root.
pub const CONFIG_FILE: &str = "pinlint.toml";

const KNOWN_KEYS: &[&str] = &["pin-file", "create-missing", "boms", "checks"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Pin file location, relative to the build root.
    pub pin_file: PathBuf,
    /// Create an empty pin file when it is missing.
    pub create_missing: bool,
    /// BOM poms used by the conflict check, relative to the build root.
    pub boms: Vec<PathBuf>,
    /// Checks run by the aggregate `check` command.
    pub checks: Vec<CheckKind>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            pin_file: PathBuf::from(VERSIONS_PROPS),
            create_missing: true,
            boms: Vec::new(),
            checks: CheckKind::ALL.to_vec(),
        }
    }
}

impl LintConfig {
    /// Loads the configuration at `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `LintError::Config` if the file is not valid TOML or a key
    /// has the wrong type, and `LintError::Io` if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses configuration content. `file` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `LintError::Config` for invalid TOML or mistyped keys.
    pub fn parse(content: &str, file: &str) -> Result<Self> {
        let doc: DocumentMut = content
            .parse()
            .map_err(|e: toml_edit::TomlError| LintError::config(file, e.to_string()))?;

        let mut config = Self::default();

        for (key, _) in doc.iter() {
            if !KNOWN_KEYS.contains(&key) {
                tracing::warn!("Ignoring unknown key '{}' in {}", key, file);
            }
        }

        if let Some(item) = doc.get("pin-file") {
            let value = item
                .as_str()
                .ok_or_else(|| LintError::config(file, "'pin-file' must be a string"))?;
            config.pin_file = PathBuf::from(value);
        }

        if let Some(item) = doc.get("create-missing") {
            config.create_missing = item
                .as_bool()
                .ok_or_else(|| LintError::config(file, "'create-missing' must be a boolean"))?;
        }

        if let Some(item) = doc.get("boms") {
            config.boms = string_array(item, "boms", file)?
                .into_iter()
                .map(PathBuf::from)
                .collect();
        }

        if let Some(item) = doc.get("checks") {
            let mut checks = Vec::new();
            for name in string_array(item, "checks", file)? {
                let kind = name
                    .parse::<CheckKind>()
                    .map_err(|message| LintError::config(file, message))?;
                if !checks.contains(&kind) {
                    checks.push(kind);
                }
            }
            config.checks = checks;
        }

        Ok(config)
    }

    /// Appends BOMs given on the command line after the configured ones.
    pub fn with_extra_boms(mut self, boms: impl IntoIterator<Item = PathBuf>) -> Self {
        for bom in boms {
            if !self.boms.contains(&bom) {
                self.boms.push(bom);
            }
        }
        self
    }
}

fn string_array(item: &Item, key: &str, file: &str) -> Result<Vec<String>> {
    let array = item
        .as_array()
        .ok_or_else(|| LintError::config(file, format!("'{key}' must be an array of strings")))?;

    array
        .iter()
        .map(|value| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                LintError::config(file, format!("'{key}' must be an array of strings"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LintConfig::parse("", "pinlint.toml").unwrap();
        assert_eq!(config, LintConfig::default());
        assert_eq!(config.pin_file, PathBuf::from("versions.props"));
        assert!(config.create_missing);
        assert_eq!(config.checks, CheckKind::ALL.to_vec());
    }

    #[test]
    fn test_full_config() {
        let content = r#"
pin-file = "gradle/versions.props"
create-missing = false
boms = ["boms/platform.pom", "boms/extra.pom"]
checks = ["unused"]
"#;
        let config = LintConfig::parse(content, "pinlint.toml").unwrap();
        assert_eq!(config.pin_file, PathBuf::from("gradle/versions.props"));
        assert!(!config.create_missing);
        assert_eq!(
            config.boms,
            vec![PathBuf::from("boms/platform.pom"), PathBuf::from("boms/extra.pom")]
        );
        assert_eq!(config.checks, vec![CheckKind::NoUnusedPin]);
    }

    #[test]
    fn test_duplicate_checks_collapsed() {
        let content = r#"checks = ["bom-conflict", "checkBomConflict", "unused"]"#;
        let config = LintConfig::parse(content, "pinlint.toml").unwrap();
        assert_eq!(
            config.checks,
            vec![CheckKind::NoBomConflict, CheckKind::NoUnusedPin]
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = LintConfig::parse("pin-file = ", "pinlint.toml").unwrap_err();
        assert!(matches!(err, LintError::Config { .. }));
    }

    #[test]
    fn test_wrong_types() {
        for content in [
            "pin-file = 3",
            "create-missing = \"yes\"",
            "boms = \"platform.pom\"",
            "boms = [1, 2]",
            "checks = [\"everything\"]",
        ] {
            let err = LintConfig::parse(content, "pinlint.toml").unwrap_err();
            assert!(
                matches!(err, LintError::Config { .. }),
                "expected config error for {content}"
            );
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = LintConfig::parse("strategy = \"OverrideTransitives\"", "pinlint.toml").unwrap();
        assert_eq!(config, LintConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = LintConfig::load(&temp_dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, LintConfig::default());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "boms = [\"platform.pom\"]\n").unwrap();

        let config = LintConfig::load(&path).unwrap();
        assert_eq!(config.boms, vec![PathBuf::from("platform.pom")]);
    }

    #[test]
    fn test_with_extra_boms() {
        let config = LintConfig {
            boms: vec![PathBuf::from("a.pom")],
            ..LintConfig::default()
        }
        .with_extra_boms(vec![PathBuf::from("a.pom"), PathBuf::from("b.pom")]);
        assert_eq!(config.boms, vec![PathBuf::from("a.pom"), PathBuf::from("b.pom")]);
    }
}
