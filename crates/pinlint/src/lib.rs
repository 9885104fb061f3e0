//! Validation of `versions.props` dependency pins.
//!
//! Runs an explicit pipeline: load configuration, resolve the build's
//! artifacts, run the selected checks, report. The command line in
//! [`cli`] is a thin layer over [`pipeline::Pipeline`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use cli::{Cli, run};
pub use config::LintConfig;
pub use error::{LintError, Result};
pub use pipeline::Pipeline;
pub use report::{CheckResult, OutputFormat, Report};
