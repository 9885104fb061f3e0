use super::Context;
use crate::error::Result;
use crate::report::OutputFormat;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug, Default)]
#[command(about = "Print the pins the linter sees")]
pub struct PinsArgs {
    /// Include source line numbers
    #[arg(long)]
    pub lines: bool,
}

pub fn handle_pins(ctx: &Context, args: &PinsArgs, out: &mut dyn Write) -> Result<()> {
    let pins = ctx.pipeline()?.load_pins()?;

    match ctx.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&pins)?)?,
        OutputFormat::Text => {
            for pin in &pins {
                if args.lines {
                    writeln!(out, "{:>4}: {}", pin.line, pin)?;
                } else {
                    writeln!(out, "{pin}")?;
                }
            }
        }
    }

    Ok(())
}
