//! Parser for `versions.props` pin files.
//!
//! Line-oriented: a running linter flag toggled by `# linter:OFF` and
//! `# linter:ON` decides which lines take part, everything from the first
//! `#` is dropped, and what remains must fully match the pin regex.
//! Lines that do not match are ignored, never reported.

use crate::error::{PinError, Result};
use crate::types::Pin;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Disables pin parsing for the following lines. Exact match, case-sensitive.
pub const LINTER_OFF: &str = "# linter:OFF";
/// Re-enables pin parsing for the following lines.
pub const LINTER_ON: &str = "# linter:ON";

/// Matches: group:artifact = version (whole line)
static RE_VERSION_FORCE: OnceLock<Regex> = OnceLock::new();

fn re_version_force() -> &'static Regex {
    RE_VERSION_FORCE
        .get_or_init(|| Regex::new(r"^([^:=\s]+:[^:=\s]+)\s*=\s*([^\s]+)$").unwrap())
}

/// Reads and parses the pin file at `path`.
///
/// # Errors
///
/// - `PinError::ConfigurationMissing` if `path` does not exist
/// - `PinError::Read` if the file exists but cannot be read
pub fn read_versions_props(path: &Path) -> Result<Vec<Pin>> {
    if !path.exists() {
        return Err(PinError::ConfigurationMissing {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!("Parsing pin file: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| PinError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let pins = parse_versions_props(&content);
    tracing::debug!("Parsed {} pins from {}", pins.len(), path.display());
    Ok(pins)
}

/// Parses pin file content into pins, in file order.
///
/// Duplicate patterns are all kept.
pub fn parse_versions_props(content: &str) -> Vec<Pin> {
    let mut active = true;
    let mut pins = Vec::new();

    for (line_idx, raw) in content.lines().enumerate() {
        if raw == LINTER_ON {
            active = true;
        } else if raw == LINTER_OFF {
            active = false;
        }

        if !active {
            continue;
        }

        if let Some((pattern, version)) = parse_pin_line(raw) {
            pins.push(Pin {
                pattern: pattern.to_string(),
                version: version.to_string(),
                line: line_idx + 1,
            });
        }
    }

    pins
}

/// Strips the comment from one line and matches it against the pin regex.
///
/// The first `#` truncates the line, even inside a version string.
fn parse_pin_line(raw: &str) -> Option<(&str, &str)> {
    let line = match raw.find('#') {
        Some(idx) => &raw[..idx],
        None => raw,
    };

    let caps = re_version_force().captures(line.trim_end())?;
    let pattern = caps.get(1)?.as_str();
    let version = caps.get(2)?.as_str();
    Some((pattern, version))
}
