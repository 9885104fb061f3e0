//! The validation pipeline: load pins, resolve artifacts, run checks.
//!
//! Every run reads fresh inputs. Artifacts are resolved once per run and
//! shared by all selected checks; BOM recommendations are loaded only when
//! the conflict check is selected.

use crate::config::LintConfig;
use crate::error::Result;
use crate::report::{CheckResult, Report};
use pinlint_core::check::{CheckKind, find_bom_conflicts, find_unused, unused_pins_message};
use pinlint_core::{
    ArtifactResolver, ArtifactSet, Bootstrap, Pin, RecommendationProvider, ensure_pin_file,
    merge_recommendations, read_versions_props,
};
use pinlint_gradle::{PomBom, build_resolver};
use std::path::{Path, PathBuf};

pub struct Pipeline {
    root: PathBuf,
    config: LintConfig,
    resolver: Box<dyn ArtifactResolver>,
    providers: Vec<Box<dyn RecommendationProvider>>,
}

impl Pipeline {
    pub fn new(
        root: impl Into<PathBuf>,
        config: LintConfig,
        resolver: Box<dyn ArtifactResolver>,
        providers: Vec<Box<dyn RecommendationProvider>>,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            resolver,
            providers,
        }
    }

    /// Pipeline over the Gradle build at `root`, reading its lock state and
    /// the BOMs listed in `config`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if project discovery fails.
    pub fn for_gradle(root: &Path, config: LintConfig) -> Result<Self> {
        let resolver = build_resolver(root)?;
        tracing::debug!("Resolution units: {:?}", resolver.unit_names());

        let providers = config
            .boms
            .iter()
            .map(|bom| Box::new(PomBom::new(root.join(bom))) as Box<dyn RecommendationProvider>)
            .collect();

        Ok(Self::new(root, config, Box::new(resolver), providers))
    }

    pub fn pin_file(&self) -> PathBuf {
        self.root.join(&self.config.pin_file)
    }

    /// Creates the pin file if it is missing.
    pub fn init(&self) -> Bootstrap {
        ensure_pin_file(&self.pin_file())
    }

    /// Reads the pins, bootstrapping the file first when configured to.
    ///
    /// # Errors
    ///
    /// Returns `PinError::ConfigurationMissing` if the file is missing and
    /// bootstrap is disabled, or `PinError::Read` if it cannot be read.
    pub fn load_pins(&self) -> Result<Vec<Pin>> {
        let path = self.pin_file();

        if self.config.create_missing
            && let Bootstrap::Degraded { .. } = self.init()
        {
            return Ok(Vec::new());
        }

        let pins = read_versions_props(&path)?;
        tracing::debug!(
            "Loaded {} pins ({} globs) from {}",
            pins.len(),
            pins.iter().filter(|pin| pin.is_glob()).count(),
            path.display()
        );
        Ok(pins)
    }

    /// Runs the configured checks.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`].
    pub fn run_configured(&self) -> Result<Report> {
        let checks = self.config.checks.clone();
        self.run(&checks)
    }

    /// Runs `checks` and collects their findings into a report.
    ///
    /// Failed checks do not make this return an error; use
    /// [`Report::into_result`] for that.
    ///
    /// # Errors
    ///
    /// Returns fatal errors only: unreadable pin file, resolution failure,
    /// invalid pattern or unreadable BOM.
    pub fn run(&self, checks: &[CheckKind]) -> Result<Report> {
        let pins = self.load_pins()?;

        let artifacts = if checks.is_empty() {
            ArtifactSet::new()
        } else {
            self.resolver.resolve_all_artifacts()?
        };

        let mut results = Vec::with_capacity(checks.len());
        for check in checks {
            let result = match check {
                CheckKind::NoUnusedPin => self.check_unused(&pins, &artifacts)?,
                CheckKind::NoBomConflict => self.check_bom_conflicts(&pins, &artifacts)?,
            };
            tracing::info!(
                "Check {} {}",
                check,
                if result.passed { "passed" } else { "failed" }
            );
            results.push(result);
        }

        Ok(Report {
            pin_file: self.pin_file(),
            pins: pins.len(),
            artifacts: artifacts.len(),
            results,
        })
    }

    fn check_unused(&self, pins: &[Pin], artifacts: &ArtifactSet) -> Result<CheckResult> {
        let unused = find_unused(pins, artifacts)?;
        if unused.is_empty() {
            return Ok(CheckResult::passed(CheckKind::NoUnusedPin));
        }

        Ok(CheckResult {
            message: Some(unused_pins_message(&unused)),
            passed: false,
            unused,
            ..CheckResult::passed(CheckKind::NoUnusedPin)
        })
    }

    fn check_bom_conflicts(&self, pins: &[Pin], artifacts: &ArtifactSet) -> Result<CheckResult> {
        if self.providers.is_empty() {
            tracing::info!("No BOMs configured, skipping conflict detection");
            return Ok(CheckResult::passed(CheckKind::NoBomConflict));
        }

        let recommendations = merge_recommendations(&self.providers)?;
        let findings = find_bom_conflicts(pins, artifacts, &recommendations)?;

        let message = findings.has_conflicts().then(|| findings.message());
        Ok(CheckResult {
            passed: message.is_none(),
            message,
            conflicts: findings.conflicts,
            redundant: findings.redundant,
            ..CheckResult::passed(CheckKind::NoBomConflict)
        })
    }
}
