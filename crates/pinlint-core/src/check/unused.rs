//! Unused-pin detection.

use crate::error::Result;
use crate::matcher::PinMatcher;
use crate::types::{ArtifactSet, Pin};

/// Returns the pattern of every pin that matches no resolved artifact.
///
/// Output follows pin order. Duplicate pins are judged independently, so
/// an unused pattern listed twice is reported twice.
///
/// # Errors
///
/// Returns `PinError::InvalidPattern` if a pattern cannot be compiled.
pub fn find_unused(pins: &[Pin], artifacts: &ArtifactSet) -> Result<Vec<String>> {
    let mut unused = Vec::new();

    for pin in pins {
        let matcher = PinMatcher::new(&pin.pattern)?;
        if !artifacts.iter().any(|artifact| matcher.matches(artifact)) {
            tracing::debug!("Pin '{}' (line {}) matches no artifact", pin.pattern, pin.line);
            unused.push(pin.pattern.clone());
        }
    }

    Ok(unused)
}

/// Builds the single failure message listing every unused pattern.
pub fn unused_pins_message(unused: &[String]) -> String {
    format!(
        "There are unused pins in your versions.props:\n{}",
        unused.join("\n")
    )
}
