//! Contracts for the inputs the checks depend on.
//!
//! Checks never talk to a build tool directly. They receive the resolved
//! artifact set through [`ArtifactResolver`] and BOM recommendations through
//! [`RecommendationProvider`], so they can be exercised with fixed sets.

use crate::error::{PinError, Result};
use crate::types::{ArtifactSet, Recommendations};

/// One independently resolvable part of a build.
///
/// For Gradle this is a project's lock state or a whole-build lock file.
/// Implementors report their own failures; [`UnitCollector`] attaches the
/// unit name.
pub trait ResolutionUnit {
    /// Human-readable name used in error messages (e.g. `project ':api'`).
    fn name(&self) -> String;

    /// Resolves the `group:name` coordinates of every resolvable
    /// configuration of this unit.
    fn resolve(&self) -> Result<ArtifactSet>;
}

/// Produces the complete set of resolved artifacts for a build.
pub trait ArtifactResolver {
    /// # Errors
    ///
    /// Returns `PinError::ResolutionFailure` when any part of the build
    /// fails to resolve. Partial sets are never returned.
    fn resolve_all_artifacts(&self) -> Result<ArtifactSet>;
}

/// A fixed artifact set resolves to itself.
impl ArtifactResolver for ArtifactSet {
    fn resolve_all_artifacts(&self) -> Result<ArtifactSet> {
        Ok(self.clone())
    }
}

/// Unions the artifacts of every unit, aborting on the first failure.
pub struct UnitCollector {
    units: Vec<Box<dyn ResolutionUnit>>,
}

impl UnitCollector {
    pub fn new(units: Vec<Box<dyn ResolutionUnit>>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit_names(&self) -> Vec<String> {
        self.units.iter().map(|u| u.name()).collect()
    }
}

impl ArtifactResolver for UnitCollector {
    fn resolve_all_artifacts(&self) -> Result<ArtifactSet> {
        let mut artifacts = ArtifactSet::new();

        for unit in &self.units {
            let name = unit.name();
            tracing::debug!("Resolving artifacts of {}", name);

            let resolved = unit.resolve().map_err(|e| match e {
                already @ PinError::ResolutionFailure { .. } => already,
                other => PinError::resolution_failure(name.clone(), other),
            })?;

            tracing::debug!("{} resolved {} artifacts", name, resolved.len());
            artifacts.extend(resolved);
        }

        tracing::info!(
            "Resolved {} distinct artifacts from {} units",
            artifacts.len(),
            self.units.len()
        );

        Ok(artifacts)
    }
}

/// A source of BOM version recommendations.
pub trait RecommendationProvider {
    /// Name used in logs and error messages (e.g. the BOM path).
    fn name(&self) -> String;

    fn recommendations(&self) -> Result<Recommendations>;
}

/// Merges the recommendations of several providers in order.
///
/// When two providers recommend the same artifact the first one wins.
pub fn merge_recommendations(
    providers: &[Box<dyn RecommendationProvider>],
) -> Result<Recommendations> {
    let mut merged = Recommendations::new();

    for provider in providers {
        let recommendations = provider.recommendations()?;
        tracing::debug!(
            "{} recommends {} artifacts",
            provider.name(),
            recommendations.len()
        );
        for (artifact, version) in recommendations {
            merged.entry(artifact).or_insert(version);
        }
    }

    Ok(merged)
}
