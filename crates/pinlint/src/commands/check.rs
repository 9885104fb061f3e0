use super::Context;
use crate::error::Result;
use clap::Args;
use pinlint_core::check::CheckKind;
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Run only this check instead of the configured ones (repeatable)
    #[arg(long, value_parser = parse_check)]
    pub only: Vec<CheckKind>,
}

impl CheckArgs {
    pub fn only(check: CheckKind) -> Self {
        Self { only: vec![check] }
    }
}

fn parse_check(value: &str) -> std::result::Result<CheckKind, String> {
    value.parse()
}

/// Runs the selected checks and prints the report.
///
/// The report is written even when a check fails; the failure is then
/// returned as `LintError::Validation`.
pub fn handle_check(ctx: &Context, args: &CheckArgs, out: &mut dyn Write) -> Result<()> {
    let pipeline = ctx.pipeline()?;

    let report = if args.only.is_empty() {
        pipeline.run_configured()?
    } else {
        pipeline.run(&args.only)?
    };

    let rendered = report.render(ctx.format)?;
    write!(out, "{rendered}")?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }

    report.into_result().map(|_| ())
}
