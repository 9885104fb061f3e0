use crate::commands::{
    CheckArgs, Context, InitArgs, PinsArgs, handle_check, handle_init, handle_pins,
};
use crate::config::{CONFIG_FILE, LintConfig};
use crate::error::Result;
use crate::report::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use pinlint_core::check::CheckKind;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pinlint",
    author,
    version,
    about = "Validates versions.props dependency pins against a Gradle build",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Build root containing settings.gradle and the pin file
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file [default: <root>/pinlint.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Additional BOM pom, relative to the root (repeatable)
    #[arg(long = "bom", global = true)]
    pub boms: Vec<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every configured check; fails if any check fails
    Check(CheckArgs),
    /// Fail if a pin matches no resolved artifact
    Unused,
    /// Fail if a pin disagrees with a BOM recommendation
    BomConflict,
    Init(InitArgs),
    Pins(PinsArgs),
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    fn context(&self) -> Result<Context> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE));
        let config = LintConfig::load(&config_path)?.with_extra_boms(self.boms.iter().cloned());

        Ok(Context {
            root: self.root.clone(),
            config,
            format: self.format,
        })
    }
}

/// Runs the parsed command line, writing reports to `out`.
///
/// # Errors
///
/// Returns `LintError::Validation` when a check fails and any other
/// variant for fatal errors. See [`crate::LintError::exit_code`].
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let ctx = cli.context()?;

    match &cli.command {
        Commands::Check(args) => handle_check(&ctx, args, out),
        Commands::Unused => handle_check(&ctx, &CheckArgs::only(CheckKind::NoUnusedPin), out),
        Commands::BomConflict => {
            handle_check(&ctx, &CheckArgs::only(CheckKind::NoBomConflict), out)
        }
        Commands::Init(args) => handle_init(&ctx, args, out),
        Commands::Pins(args) => handle_pins(&ctx, args, out),
    }
}
