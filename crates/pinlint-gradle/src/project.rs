//! Gradle projects as resolution units.
//!
//! A multi-project build is discovered from its settings file. Each project
//! resolves to the union of every configuration recorded in its lock state.
//! A root `versions.lock` (gradle-consistent-versions) already covers the
//! whole build and replaces the per-project units.

use crate::error::{GradleError, Result};
use crate::lockfile::{
    LockedArtifact, parse_gradle_lockfile, parse_legacy_lockfile, parse_versions_lock,
};
use crate::settings::{SETTINGS_FILES, parse_settings_includes, project_dir};
use pinlint_core::{ArtifactSet, PinError, ResolutionUnit, UnitCollector};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub const GRADLE_LOCKFILE: &str = "gradle.lockfile";
pub const LEGACY_LOCKS_DIR: &str = "gradle/dependency-locks";
pub const VERSIONS_LOCK: &str = "versions.lock";

/// One project of a Gradle build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleProject {
    /// Gradle project path, `:` for the root project.
    pub path: String,
    pub dir: PathBuf,
}

impl GradleProject {
    pub fn new(path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dir: dir.into(),
        }
    }

    /// Reads every lock file of this project.
    ///
    /// # Errors
    ///
    /// - `GradleError::MissingLockState` if the project has no lock files
    /// - `GradleError::ParseError` for malformed lock entries
    pub fn locked_artifacts(&self) -> Result<Vec<LockedArtifact>> {
        let mut locked = Vec::new();
        let mut found = false;

        let lockfile = self.dir.join(GRADLE_LOCKFILE);
        if lockfile.is_file() {
            found = true;
            let content = std::fs::read_to_string(&lockfile)?;
            locked.extend(parse_gradle_lockfile(&content, &lockfile.display().to_string())?);
        }

        let legacy_dir = self.dir.join(LEGACY_LOCKS_DIR);
        if legacy_dir.is_dir() {
            let mut files: Vec<PathBuf> = std::fs::read_dir(&legacy_dir)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "lockfile"))
                .collect();
            files.sort();

            for file in files {
                let Some(configuration) = file.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                found = true;
                let content = std::fs::read_to_string(&file)?;
                locked.extend(parse_legacy_lockfile(
                    &content,
                    &file.display().to_string(),
                    configuration,
                )?);
            }
        }

        if !found {
            return Err(GradleError::MissingLockState {
                dir: self.dir.display().to_string(),
            });
        }

        Ok(locked)
    }
}

impl ResolutionUnit for GradleProject {
    fn name(&self) -> String {
        format!("project '{}'", self.path)
    }

    fn resolve(&self) -> pinlint_core::Result<ArtifactSet> {
        let locked = self
            .locked_artifacts()
            .map_err(|e| PinError::resolution_failure(self.name(), e))?;

        Ok(collect_locked(&self.name(), locked))
    }
}

/// A root `versions.lock` covering every project of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionsLock {
    pub path: PathBuf,
}

impl VersionsLock {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// `GradleError::ParseError` for malformed entries.
    pub fn locked_artifacts(&self) -> Result<Vec<LockedArtifact>> {
        let content = std::fs::read_to_string(&self.path)?;
        parse_versions_lock(&content, &self.path.display().to_string())
    }
}

impl ResolutionUnit for VersionsLock {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn resolve(&self) -> pinlint_core::Result<ArtifactSet> {
        let locked = self
            .locked_artifacts()
            .map_err(|e| PinError::resolution_failure(self.name(), e))?;

        Ok(collect_locked(&self.name(), locked))
    }
}

/// Reduces lock entries to their coordinates.
///
/// Logs how many modules each configuration locks, and modules locked at
/// different versions in different configurations.
fn collect_locked(unit: &str, locked: Vec<LockedArtifact>) -> ArtifactSet {
    let mut per_configuration: BTreeMap<&str, usize> = BTreeMap::new();
    let mut versions: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();

    for artifact in &locked {
        for configuration in &artifact.configurations {
            *per_configuration.entry(configuration.as_str()).or_default() += 1;
        }
        versions
            .entry(artifact.coordinate.to_string())
            .or_default()
            .insert(artifact.version.as_str());
    }

    for (configuration, count) in &per_configuration {
        tracing::debug!("{} locks {} modules in {}", unit, count, configuration);
    }
    for (coordinate, seen) in &versions {
        if seen.len() > 1 {
            tracing::debug!("{} locks {} at several versions: {:?}", unit, coordinate, seen);
        }
    }

    versions.into_keys().collect()
}

/// Lists the root project and every project included by the settings file.
///
/// Without a settings file the build is a single root project.
///
/// # Errors
///
/// Returns an I/O error if the settings file exists but cannot be read.
pub fn discover_projects(root: &Path) -> Result<Vec<GradleProject>> {
    let mut projects = vec![GradleProject::new(":", root)];

    let Some(settings) = SETTINGS_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
    else {
        tracing::debug!("No settings file in {}, single-project build", root.display());
        return Ok(projects);
    };

    let content = std::fs::read_to_string(&settings)?;
    for path in parse_settings_includes(&content) {
        let dir = root.join(project_dir(&path));
        projects.push(GradleProject::new(path, dir));
    }

    tracing::debug!(
        "Discovered {} projects from {}",
        projects.len(),
        settings.display()
    );
    Ok(projects)
}

/// Builds the artifact resolver for the Gradle build rooted at `root`.
///
/// # Errors
///
/// Returns an I/O error if project discovery fails.
pub fn build_resolver(root: &Path) -> Result<UnitCollector> {
    let versions_lock = root.join(VERSIONS_LOCK);
    if versions_lock.is_file() {
        tracing::debug!("Using {} for the whole build", versions_lock.display());
        return Ok(UnitCollector::new(vec![Box::new(VersionsLock::new(
            versions_lock,
        ))]));
    }

    let units: Vec<Box<dyn ResolutionUnit>> = discover_projects(root)?
        .into_iter()
        .map(|project| Box::new(project) as Box<dyn ResolutionUnit>)
        .collect();

    Ok(UnitCollector::new(units))
}
