//! Domain types shared by the parser, the resolver contract and the checks.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Every `group:name` coordinate resolved anywhere in the build.
pub type ArtifactSet = BTreeSet<String>;

/// Versions recommended by BOMs, keyed by `group:name`.
pub type Recommendations = BTreeMap<String, String>;

/// A forced version override read from `versions.props`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pin {
    /// Exact `group:artifact` coordinate or a glob containing `*`.
    pub pattern: String,
    /// Opaque version string.
    pub version: String,
    /// 1-based line in the pin file.
    pub line: usize,
}

impl Pin {
    pub fn new(pattern: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            version: version.into(),
            line: 0,
        }
    }

    /// Returns true if the pattern contains a `*` wildcard.
    pub fn is_glob(&self) -> bool {
        self.pattern.contains('*')
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.pattern, self.version)
    }
}

/// A `group:name` module coordinate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_display() {
        let pin = Pin::new("com.google.guava:guava", "33.0.0-jre");
        assert_eq!(pin.to_string(), "com.google.guava:guava = 33.0.0-jre");
        assert!(!pin.is_glob());
    }

    #[test]
    fn test_pin_glob() {
        assert!(Pin::new("com.fasterxml.jackson.*:*", "2.16.1").is_glob());
    }

    #[test]
    fn test_coordinate_display() {
        let coord = Coordinate::new("org.slf4j", "slf4j-api");
        assert_eq!(coord.to_string(), "org.slf4j:slf4j-api");
    }
}
