//! Gradle support for pinlint.
//!
//! Provides the build-tool side of the checks:
//! - project discovery from `settings.gradle` / `settings.gradle.kts`
//! - resolved artifacts from dependency lock state (`gradle.lockfile`,
//!   legacy `gradle/dependency-locks/*.lockfile`, `versions.lock`)
//! - BOM recommendations from `pom.xml` `<dependencyManagement>`

pub mod bom;
pub mod error;
pub mod lockfile;
pub mod project;
pub mod settings;

pub use bom::{PomBom, parse_bom};
pub use error::{GradleError, Result};
pub use lockfile::{LockedArtifact, parse_gradle_lockfile, parse_legacy_lockfile, parse_versions_lock};
pub use project::{GradleProject, VersionsLock, build_resolver, discover_projects};
pub use settings::parse_settings_includes;
