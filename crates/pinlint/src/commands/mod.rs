mod check;
mod init;
mod pins;

pub use check::{CheckArgs, handle_check};
pub use init::{InitArgs, handle_init};
pub use pins::{PinsArgs, handle_pins};

use crate::config::LintConfig;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::report::OutputFormat;
use std::path::PathBuf;

/// Settings shared by every command, after config and flags are merged.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config: LintConfig,
    pub format: OutputFormat,
}

impl Context {
    fn pipeline(&self) -> Result<Pipeline> {
        Pipeline::for_gradle(&self.root, self.config.clone())
    }
}
