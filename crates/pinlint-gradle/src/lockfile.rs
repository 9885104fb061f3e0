//! Parsers for Gradle dependency lock state.
//!
//! Supported formats:
//! - `gradle.lockfile`: one line per module, `group:name:version=conf1,conf2`,
//!   plus an `empty=` line listing configurations without dependencies
//! - legacy `gradle/dependency-locks/<configuration>.lockfile`: one
//!   `group:name:version` per line
//! - `versions.lock` (gradle-consistent-versions):
//!   `group:name:version (N constraints: hash)` with `[Test dependencies]`
//!   section headers
//!
//! Only resolvable configurations are ever locked, so every entry counts as
//! a resolved artifact.

use crate::error::{GradleError, Result};
use pinlint_core::Coordinate;
use regex::Regex;
use std::sync::OnceLock;

/// Matches: group:name:version=conf1,conf2
static RE_GRADLE_LOCK: OnceLock<Regex> = OnceLock::new();
/// Matches: group:name:version
static RE_LEGACY_LOCK: OnceLock<Regex> = OnceLock::new();
/// Matches: group:name:version (2 constraints: 3a1b9c48)
static RE_VERSIONS_LOCK: OnceLock<Regex> = OnceLock::new();

fn re_gradle_lock() -> &'static Regex {
    RE_GRADLE_LOCK.get_or_init(|| {
        Regex::new(r"^([^:=\s]+):([^:=\s]+):([^:=\s]+)=([^\s]*)$").unwrap()
    })
}

fn re_legacy_lock() -> &'static Regex {
    RE_LEGACY_LOCK
        .get_or_init(|| Regex::new(r"^([^:=\s]+):([^:=\s]+):([^:=\s]+)$").unwrap())
}

fn re_versions_lock() -> &'static Regex {
    RE_VERSIONS_LOCK.get_or_init(|| {
        Regex::new(r"^([^:\s]+):([^:\s]+):([^:\s]+)(?:\s+\([^)]*\))?$").unwrap()
    })
}

/// A module recorded in lock state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedArtifact {
    pub coordinate: Coordinate,
    pub version: String,
    /// Configurations (or lock sections) the module was resolved in.
    pub configurations: Vec<String>,
}

/// Parses a `gradle.lockfile`.
///
/// # Errors
///
/// Returns `GradleError::ParseError` for any line that is neither a
/// comment, blank, `empty=` nor a `group:name:version=...` entry.
pub fn parse_gradle_lockfile(content: &str, file: &str) -> Result<Vec<LockedArtifact>> {
    let mut locked = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("empty=") {
            continue;
        }

        let caps = re_gradle_lock()
            .captures(trimmed)
            .ok_or_else(|| GradleError::ParseError {
                file: file.to_string(),
                line: line_idx + 1,
                message: format!("expected 'group:name:version=configurations', got '{trimmed}'"),
            })?;

        let group = caps.get(1).map_or("", |m| m.as_str());
        let name = caps.get(2).map_or("", |m| m.as_str());
        let version = caps.get(3).map_or("", |m| m.as_str());
        let configurations = caps
            .get(4)
            .map_or("", |m| m.as_str())
            .split(',')
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        locked.push(LockedArtifact {
            coordinate: Coordinate::new(group, name),
            version: version.to_string(),
            configurations,
        });
    }

    tracing::debug!("Parsed {}: {} locked modules", file, locked.len());
    Ok(locked)
}

/// Parses a legacy single-configuration lock file.
///
/// # Errors
///
/// Returns `GradleError::ParseError` for malformed entries.
pub fn parse_legacy_lockfile(
    content: &str,
    file: &str,
    configuration: &str,
) -> Result<Vec<LockedArtifact>> {
    let mut locked = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let caps = re_legacy_lock()
            .captures(trimmed)
            .ok_or_else(|| GradleError::ParseError {
                file: file.to_string(),
                line: line_idx + 1,
                message: format!("expected 'group:name:version', got '{trimmed}'"),
            })?;

        locked.push(LockedArtifact {
            coordinate: Coordinate::new(
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            version: caps.get(3).map_or("", |m| m.as_str()).to_string(),
            configurations: vec![configuration.to_string()],
        });
    }

    Ok(locked)
}

/// Parses a gradle-consistent-versions `versions.lock`.
///
/// Entries before any section header belong to `main`; a header such as
/// `[Test dependencies]` starts the `test` section.
///
/// # Errors
///
/// Returns `GradleError::ParseError` for malformed entries.
pub fn parse_versions_lock(content: &str, file: &str) -> Result<Vec<LockedArtifact>> {
    let mut locked = Vec::new();
    let mut section = "main".to_string();

    for (line_idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(header) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            section = section_name(header);
            continue;
        }

        let caps = re_versions_lock()
            .captures(trimmed)
            .ok_or_else(|| GradleError::ParseError {
                file: file.to_string(),
                line: line_idx + 1,
                message: format!("expected 'group:name:version (constraints)', got '{trimmed}'"),
            })?;

        locked.push(LockedArtifact {
            coordinate: Coordinate::new(
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            version: caps.get(3).map_or("", |m| m.as_str()).to_string(),
            configurations: vec![section.clone()],
        });
    }

    tracing::debug!("Parsed {}: {} locked modules", file, locked.len());
    Ok(locked)
}

/// `Test dependencies` -> `test`
fn section_name(header: &str) -> String {
    header
        .split_whitespace()
        .next()
        .unwrap_or("main")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gradle_lockfile() {
        let lock = "# This is a Gradle generated file for dependency locking.
# Manual edits can break the build and are not advised.
# This file is expected to be part of source control.
com.google.guava:failureaccess:1.0.1=compileClasspath,runtimeClasspath
com.google.guava:guava:31.1-jre=compileClasspath,runtimeClasspath
junit:junit:4.13.2=testCompileClasspath,testRuntimeClasspath
empty=annotationProcessor,testAnnotationProcessor
";
        let locked = parse_gradle_lockfile(lock, "gradle.lockfile").unwrap();
        assert_eq!(locked.len(), 3);
        assert_eq!(locked[1].coordinate.to_string(), "com.google.guava:guava");
        assert_eq!(locked[1].version, "31.1-jre");
        assert_eq!(
            locked[1].configurations,
            vec!["compileClasspath", "runtimeClasspath"]
        );
    }

    #[test]
    fn test_parse_gradle_lockfile_only_empty() {
        let lock = "empty=annotationProcessor,compileClasspath\n";
        assert!(parse_gradle_lockfile(lock, "gradle.lockfile").unwrap().is_empty());
    }

    #[test]
    fn test_parse_gradle_lockfile_malformed() {
        let lock = "com.google.guava:guava:31.1-jre=compileClasspath\ngarbage line\n";
        let err = parse_gradle_lockfile(lock, "gradle.lockfile").unwrap_err();
        match err {
            GradleError::ParseError { file, line, .. } => {
                assert_eq!(file, "gradle.lockfile");
                assert_eq!(line, 2);
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_gradle_lockfile_missing_version() {
        let lock = "com.google.guava:guava=compileClasspath\n";
        assert!(parse_gradle_lockfile(lock, "gradle.lockfile").is_err());
    }

    #[test]
    fn test_parse_legacy_lockfile() {
        let lock = "# legacy lock\norg.slf4j:slf4j-api:2.0.9\n\nch.qos.logback:logback-classic:1.4.11\n";
        let locked = parse_legacy_lockfile(lock, "compileClasspath.lockfile", "compileClasspath")
            .unwrap();
        assert_eq!(locked.len(), 2);
        assert_eq!(locked[0].coordinate.to_string(), "org.slf4j:slf4j-api");
        assert_eq!(locked[1].configurations, vec!["compileClasspath"]);
    }

    #[test]
    fn test_parse_legacy_lockfile_malformed() {
        let lock = "org.slf4j:slf4j-api\n";
        assert!(parse_legacy_lockfile(lock, "x.lockfile", "x").is_err());
    }

    #[test]
    fn test_parse_versions_lock() {
        let lock = "# Run ./gradlew --write-locks to regenerate this file
com.fasterxml.jackson.core:jackson-annotations:2.9.0 (2 constraints: 3a1b9c48)
com.google.guava:guava:27.0.1-jre (1 constraints: 8a1c4b8f)

[Test dependencies]
junit:junit:4.12 (1 constraints: db04fc30)
";
        let locked = parse_versions_lock(lock, "versions.lock").unwrap();
        assert_eq!(locked.len(), 3);
        assert_eq!(locked[0].configurations, vec!["main"]);
        assert_eq!(locked[1].version, "27.0.1-jre");
        assert_eq!(locked[2].coordinate.to_string(), "junit:junit");
        assert_eq!(locked[2].configurations, vec!["test"]);
    }

    #[test]
    fn test_parse_versions_lock_without_constraints() {
        let locked = parse_versions_lock("a:b:1.0\n", "versions.lock").unwrap();
        assert_eq!(locked[0].version, "1.0");
    }

    #[test]
    fn test_parse_versions_lock_malformed() {
        let err = parse_versions_lock("a:b\n", "versions.lock").unwrap_err();
        assert!(err.to_string().contains("versions.lock at line 1"));
    }

    #[test]
    fn test_section_name() {
        assert_eq!(section_name("Test dependencies"), "test");
        assert_eq!(section_name(""), "main");
    }
}
