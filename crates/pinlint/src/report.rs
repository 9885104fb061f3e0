//! Validation reports and their text/JSON rendering.

use crate::error::{LintError, Result};
use clap::ValueEnum;
use pinlint_core::check::{BomConflict, CheckKind};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub check: CheckKind,
    pub passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unused: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<BomConflict>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redundant: Vec<String>,
    /// Aggregated failure message, present only when the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    pub fn passed(check: CheckKind) -> Self {
        Self {
            check,
            passed: true,
            unused: Vec::new(),
            conflicts: Vec::new(),
            redundant: Vec::new(),
            message: None,
        }
    }

    fn summary(&self) -> String {
        match self.check {
            CheckKind::NoUnusedPin if !self.passed => {
                format!("{} unused pin(s)", self.unused.len())
            }
            CheckKind::NoBomConflict if !self.passed => {
                format!("{} conflict(s) with BOM recommendations", self.conflicts.len())
            }
            CheckKind::NoBomConflict if !self.redundant.is_empty() => {
                format!("ok, {} redundant pin(s)", self.redundant.len())
            }
            _ => "ok".to_string(),
        }
    }
}

/// Result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub pin_file: PathBuf,
    pub pins: usize,
    pub artifacts: usize,
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Human-readable summary, one line per check.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {} pins checked against {} resolved artifacts",
            self.pin_file.display(),
            self.pins,
            self.artifacts
        );

        for result in &self.results {
            let mark = if result.passed { "ok  " } else { "FAIL" };
            let _ = writeln!(out, "  [{mark}] {}: {}", result.check, result.summary());
            for pattern in &result.redundant {
                let _ = writeln!(out, "         redundant: {pattern}");
            }
        }

        out
    }

    /// # Errors
    ///
    /// Returns `LintError::Render` if serialization fails.
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.render_json(),
        }
    }

    /// Turns failed checks into one error carrying every failure message.
    ///
    /// # Errors
    ///
    /// Returns `LintError::Validation` if any check failed.
    pub fn into_result(self) -> Result<Self> {
        let messages: Vec<&str> = self
            .results
            .iter()
            .filter_map(|r| r.message.as_deref())
            .collect();

        if messages.is_empty() {
            return Ok(self);
        }

        Err(LintError::Validation {
            message: messages.join("\n\n"),
        })
    }
}
