//! Scripted driving
//!
//! Key events are read one line at a time, so piping a live key source into
//! stdin drives the robot as the lines arrive.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::Result;
use oi_teleop_engine::{
    DisplaySink, TeleopSession, Transport, WriterSink, parse_script_line,
};
use tracing::{info, warn};

use crate::commands::Context;
use crate::error::CliError;
use crate::link;
use crate::output;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DriveStats {
    pub events: usize,
    pub sent: usize,
}

pub fn execute(ctx: &Context, script: Option<&Path>) -> Result<()> {
    let reader: Box<dyn BufRead> = match script {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                CliError::InvalidInput(format!("cannot read script {}: {e}", path.display()))
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    if ctx.json {
        let mut session = link::connect(&ctx.config, ctx.dry_run, Vec::new())?;
        let stats = feed(&mut session, reader)?;
        session.disconnect().map_err(CliError::from)?;
        output::print_drive_summary(stats.events, stats.sent, session.sink(), true);
    } else {
        let mut session = link::connect(&ctx.config, ctx.dry_run, WriterSink::new(io::stdout()))?;
        let stats = feed(&mut session, reader)?;
        session.disconnect().map_err(CliError::from)?;
        output::print_drive_summary(stats.events, stats.sent, &[], false);
    }
    Ok(())
}

/// Feed every script line through `session`, stopping at the first error.
pub fn feed<T: Transport, S: DisplaySink>(
    session: &mut TeleopSession<T, S>,
    reader: impl BufRead,
) -> Result<DriveStats> {
    let mut stats = DriveStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(CliError::from)?;
        let event = match parse_script_line(line_no, &line).map_err(CliError::from)? {
            Some(event) => event,
            None => continue,
        };

        stats.events += 1;
        match session.handle_event(&event) {
            Ok(Some(_)) => stats.sent += 1,
            Ok(None) => {}
            Err(e) => {
                warn!(line = line_no, error = %e, "Stopping script");
                return Err(CliError::from(e).into());
            }
        }
    }

    info!(events = stats.events, sent = stats.sent, "Script finished");
    Ok(stats)
}
