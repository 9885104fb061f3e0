//! Detection of pins that disagree with BOM recommendations.
//!
//! A pin conflicts when an artifact it matches is recommended by a BOM at a
//! different version. A pin is redundant when the BOM already recommends
//! the pinned version for every artifact the pin applies to.

use crate::error::Result;
use crate::matcher::PinMatcher;
use crate::types::{ArtifactSet, Pin, Recommendations};
use serde::Serialize;
use std::fmt;

/// One pin/recommendation disagreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomConflict {
    pub pin: String,
    pub pin_version: String,
    pub artifact: String,
    pub bom_version: String,
}

impl fmt::Display for BomConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} conflicts with {} = {} recommended by BOM",
            self.pin, self.pin_version, self.artifact, self.bom_version
        )
    }
}

/// Findings of the BOM conflict check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BomConflicts {
    /// Disagreements; these fail the check.
    pub conflicts: Vec<BomConflict>,
    /// Patterns of pins the BOMs make unnecessary; reported, not fatal.
    pub redundant: Vec<String>,
}

impl BomConflicts {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Single failure message listing every conflict.
    pub fn message(&self) -> String {
        let lines: Vec<String> = self.conflicts.iter().map(ToString::to_string).collect();
        format!(
            "There are conflicts between versions.props and BOM recommendations:\n{}",
            lines.join("\n")
        )
    }
}

/// Compares every pin with the BOM recommendations for the artifacts it
/// matches.
///
/// # Errors
///
/// Returns `PinError::InvalidPattern` if a pattern cannot be compiled.
pub fn find_bom_conflicts(
    pins: &[Pin],
    artifacts: &ArtifactSet,
    recommendations: &Recommendations,
) -> Result<BomConflicts> {
    let mut findings = BomConflicts::default();

    for pin in pins {
        let matcher = PinMatcher::new(&pin.pattern)?;

        let recommended: Vec<(&String, &String)> = recommendations
            .iter()
            .filter(|(artifact, _)| matcher.matches(artifact))
            .collect();

        if recommended.is_empty() {
            continue;
        }

        let mut agrees = true;
        for (artifact, bom_version) in &recommended {
            if **bom_version != pin.version {
                agrees = false;
                findings.conflicts.push(BomConflict {
                    pin: pin.pattern.clone(),
                    pin_version: pin.version.clone(),
                    artifact: (*artifact).clone(),
                    bom_version: (*bom_version).clone(),
                });
            }
        }

        let covered = matcher
            .matching(artifacts)
            .all(|artifact| recommendations.contains_key(artifact));

        if agrees && covered {
            tracing::warn!(
                "Pin '{}' (line {}) repeats the BOM recommendation {} and can be removed",
                pin.pattern,
                pin.line,
                pin.version
            );
            findings.redundant.push(pin.pattern.clone());
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts(items: &[&str]) -> ArtifactSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn recommendations(items: &[(&str, &str)]) -> Recommendations {
        items
            .iter()
            .map(|(a, v)| (a.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_conflicting_version() {
        let pins = vec![Pin::new("com.foo:a", "2.0")];
        let findings = find_bom_conflicts(
            &pins,
            &artifacts(&["com.foo:a"]),
            &recommendations(&[("com.foo:a", "1.0")]),
        )
        .unwrap();

        assert!(findings.has_conflicts());
        assert_eq!(
            findings.conflicts,
            vec![BomConflict {
                pin: "com.foo:a".into(),
                pin_version: "2.0".into(),
                artifact: "com.foo:a".into(),
                bom_version: "1.0".into(),
            }]
        );
        assert!(findings.redundant.is_empty());
    }

    #[test]
    fn test_redundant_pin() {
        let pins = vec![Pin::new("com.foo:a", "1.0")];
        let findings = find_bom_conflicts(
            &pins,
            &artifacts(&["com.foo:a"]),
            &recommendations(&[("com.foo:a", "1.0")]),
        )
        .unwrap();

        assert!(!findings.has_conflicts());
        assert_eq!(findings.redundant, vec!["com.foo:a"]);
    }

    #[test]
    fn test_glob_partially_covered_is_not_redundant() {
        let pins = vec![Pin::new("com.foo:*", "1.0")];
        let findings = find_bom_conflicts(
            &pins,
            &artifacts(&["com.foo:a", "com.foo:b"]),
            &recommendations(&[("com.foo:a", "1.0")]),
        )
        .unwrap();

        assert!(!findings.has_conflicts());
        assert!(findings.redundant.is_empty());
    }

    #[test]
    fn test_glob_reports_each_conflicting_artifact() {
        let pins = vec![Pin::new("com.foo:*", "3.0")];
        let findings = find_bom_conflicts(
            &pins,
            &artifacts(&["com.foo:a", "com.foo:b"]),
            &recommendations(&[("com.foo:a", "1.0"), ("com.foo:b", "3.0"), ("org.x:y", "1.0")]),
        )
        .unwrap();

        assert_eq!(findings.conflicts.len(), 1);
        assert_eq!(findings.conflicts[0].artifact, "com.foo:a");
        assert!(findings.redundant.is_empty());
    }

    #[test]
    fn test_unrecommended_pin_ignored() {
        let pins = vec![Pin::new("org.other:lib", "1.0")];
        let findings = find_bom_conflicts(
            &pins,
            &artifacts(&["org.other:lib"]),
            &recommendations(&[("com.foo:a", "1.0")]),
        )
        .unwrap();

        assert_eq!(findings, BomConflicts::default());
    }

    #[test]
    fn test_message_lists_every_conflict() {
        let findings = BomConflicts {
            conflicts: vec![
                BomConflict {
                    pin: "a:b".into(),
                    pin_version: "2".into(),
                    artifact: "a:b".into(),
                    bom_version: "1".into(),
                },
                BomConflict {
                    pin: "c:*".into(),
                    pin_version: "5".into(),
                    artifact: "c:d".into(),
                    bom_version: "4".into(),
                },
            ],
            redundant: vec![],
        };

        assert_eq!(
            findings.message(),
            "There are conflicts between versions.props and BOM recommendations:\n\
             a:b = 2 conflicts with a:b = 1 recommended by BOM\n\
             c:* = 5 conflicts with c:d = 4 recommended by BOM"
        );
    }
}
