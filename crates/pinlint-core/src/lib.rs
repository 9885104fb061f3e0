//! Core abstractions for pinlint.
//!
//! Provides everything needed to validate a `versions.props` pin file
//! without knowing which build tool produced the dependency graph:
//!
//! - `versions.props` parsing with linter markers and comment stripping
//! - glob pin matching against `group:name` coordinates
//! - the resolution-unit contract used to collect resolved artifacts
//! - the unused-pin and BOM-conflict checks
//! - bootstrap of an empty root pin file
//!
//! Build-tool specific adapters (lock files, BOM poms) live in
//! `pinlint-gradle`.
//!
//! # Examples
//!
//! ```
//! use pinlint_core::{ArtifactSet, check::find_unused, parse_versions_props};
//!
//! let pins = parse_versions_props("com.foo:* = 1.0\ncom.bar:baz = 2.0\n");
//! let artifacts: ArtifactSet = ["com.foo:a".to_string()].into_iter().collect();
//!
//! assert_eq!(find_unused(&pins, &artifacts).unwrap(), vec!["com.bar:baz"]);
//! ```

pub mod bootstrap;
pub mod check;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod resolver;
pub mod types;

pub use bootstrap::{Bootstrap, VERSIONS_PROPS, ensure_pin_file};
pub use error::{PinError, Result};
pub use matcher::PinMatcher;
pub use parser::{parse_versions_props, read_versions_props};
pub use resolver::{
    ArtifactResolver, RecommendationProvider, ResolutionUnit, UnitCollector,
    merge_recommendations,
};
pub use types::{ArtifactSet, Coordinate, Pin, Recommendations};
