//! One-shot discrete commands

use std::io;

use anyhow::Result;
use oi_teleop_engine::{CommandFrame, DisplaySink, OiCommand, WriterSink};

use crate::commands::Context;
use crate::error::CliError;
use crate::link;
use crate::output;

pub fn execute(ctx: &Context, command: OiCommand) -> Result<()> {
    // JSON mode reports the bytes in the result object instead of echoing.
    let frame = if ctx.json {
        send_with(ctx, command, Vec::new())?
    } else {
        send_with(ctx, command, WriterSink::new(io::stdout()))?
    };
    output::print_command_sent(command, &frame, ctx.json);
    Ok(())
}

fn send_with<S: DisplaySink>(ctx: &Context, command: OiCommand, sink: S) -> Result<CommandFrame> {
    let mut session = link::connect(&ctx.config, ctx.dry_run, sink)?;
    let frame = session.send_command(command).map_err(CliError::from)?;
    session.disconnect().map_err(CliError::from)?;
    Ok(frame)
}
