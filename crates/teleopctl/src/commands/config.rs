//! Config file management

use anyhow::Result;

use crate::commands::{ConfigCommands, Context};
use crate::config::TeleopConfig;
use crate::error::CliError;
use crate::output;

pub fn execute(ctx: &Context, cmd: &ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => init(ctx, *force),
        ConfigCommands::Show => {
            output::print_config(&ctx.config, ctx.config_path.as_deref(), ctx.json);
            Ok(())
        }
    }
}

/// Write defaults, keeping the effective port and baud rate.
fn init(ctx: &Context, force: bool) -> Result<()> {
    let path = ctx.config_path.as_deref().ok_or_else(|| {
        CliError::InvalidConfiguration(
            "no config directory on this platform; pass --config <path>".to_string(),
        )
    })?;

    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists; use --force to overwrite",
            path.display()
        ))
        .into());
    }

    let mut config = TeleopConfig::default();
    config.apply_overrides(ctx.config.serial.port.as_deref(), Some(ctx.config.serial.baud_rate));
    config.save_to_path(path)?;

    output::print_success(&format!("Wrote {}", path.display()), ctx.json);
    Ok(())
}
