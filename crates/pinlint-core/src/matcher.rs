//! Glob matching of pin patterns against `group:name` coordinates.
//!
//! A pin pattern is turned into an anchored regex: every `*` becomes `.*`
//! and every other character matches itself. The whole coordinate must
//! match, so `com.foo:*` never matches `othercom.foo:bar`.
//!
//! `.` is literal. Tools that only replace `*` with `.*` let `com.foo:*`
//! also match `comXfoo:bar`; here such a pin matches only its literal
//! group.

use crate::error::{PinError, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct PinMatcher {
    pattern: String,
    regex: Regex,
}

impl PinMatcher {
    /// Compiles `pattern` into a full-match regex.
    ///
    /// # Errors
    ///
    /// Returns `PinError::InvalidPattern` if the resulting regex cannot be
    /// compiled (for example when it exceeds the regex size limit).
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&glob_to_regex(pattern)).map_err(|source| {
            PinError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if `artifact` matches the whole pattern.
    pub fn matches(&self, artifact: &str) -> bool {
        self.regex.is_match(artifact)
    }

    /// Iterates over the members of `artifacts` matched by this pattern.
    pub fn matching<'a, I>(&'a self, artifacts: I) -> impl Iterator<Item = &'a str> + 'a
    where
        I: IntoIterator<Item = &'a String>,
        I::IntoIter: 'a,
    {
        artifacts
            .into_iter()
            .map(String::as_str)
            .filter(move |artifact| self.matches(artifact))
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^(?:{body})$")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArtifactSet;

    #[test]
    fn test_exact_match() {
        let m = PinMatcher::new("com.google.guava:guava").unwrap();
        assert!(m.matches("com.google.guava:guava"));
        assert!(!m.matches("com.google.guava:guava-testlib"));
        assert_eq!(m.pattern(), "com.google.guava:guava");
    }

    #[test]
    fn test_wildcard_name() {
        let m = PinMatcher::new("com.foo:*").unwrap();
        assert!(m.matches("com.foo:a"));
        assert!(m.matches("com.foo:b-c"));
        assert!(!m.matches("com.foobar:a"));
    }

    #[test]
    fn test_wildcard_is_anchored() {
        let m = PinMatcher::new("com.foo:*").unwrap();
        assert!(!m.matches("othercom.foo:bar"));
    }

    #[test]
    fn test_wildcard_in_group() {
        let m = PinMatcher::new("com.fasterxml.jackson.*:*").unwrap();
        assert!(m.matches("com.fasterxml.jackson.core:jackson-databind"));
        assert!(m.matches("com.fasterxml.jackson.datatype:jackson-datatype-jdk8"));
        assert!(!m.matches("com.fasterxml:classmate"));
    }

    #[test]
    fn test_dot_is_literal() {
        let m = PinMatcher::new("com.foo:bar").unwrap();
        assert!(!m.matches("comXfoo:bar"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let m = PinMatcher::new("org.foo:bar+(x)").unwrap();
        assert!(m.matches("org.foo:bar+(x)"));
        assert!(!m.matches("org.foo:barrx"));
    }

    #[test]
    fn test_glob_to_regex() {
        assert_eq!(glob_to_regex("a:*"), r"^(?:a:.*)$");
        assert_eq!(glob_to_regex("a.b:c"), r"^(?:a\.b:c)$");
    }

    #[test]
    fn test_matching_filters_set() {
        let artifacts: ArtifactSet = ["com.foo:a", "com.foo:b", "com.bar:c"]
            .into_iter()
            .map(String::from)
            .collect();
        let m = PinMatcher::new("com.foo:*").unwrap();
        let matched: Vec<&str> = m.matching(&artifacts).collect();
        assert_eq!(matched, vec!["com.foo:a", "com.foo:b"]);
    }
}
