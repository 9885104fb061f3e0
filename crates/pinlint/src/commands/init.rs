use super::Context;
use crate::error::Result;
use crate::report::OutputFormat;
use clap::Args;
use pinlint_core::Bootstrap;
use std::io::Write;

#[derive(Args, Debug, Default)]
#[command(about = "Create an empty pin file if it is missing")]
pub struct InitArgs {}

/// Creates the pin file. A failed creation is reported but not fatal.
pub fn handle_init(ctx: &Context, _args: &InitArgs, out: &mut dyn Write) -> Result<()> {
    let outcome = ctx.pipeline()?.init();

    if ctx.format == OutputFormat::Json {
        let path = outcome.path().display().to_string();
        let value = match &outcome {
            Bootstrap::Existing(_) => serde_json::json!({ "status": "existing", "path": path }),
            Bootstrap::Created(_) => serde_json::json!({ "status": "created", "path": path }),
            Bootstrap::Degraded { reason, .. } => {
                serde_json::json!({ "status": "degraded", "path": path, "reason": reason })
            }
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    match &outcome {
        Bootstrap::Existing(path) => writeln!(out, "{} already exists", path.display())?,
        Bootstrap::Created(path) => writeln!(out, "Created {}", path.display())?,
        Bootstrap::Degraded { path, reason } => {
            writeln!(out, "Could not create {}: {}", path.display(), reason)?
        }
    }

    Ok(())
}
