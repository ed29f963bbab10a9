//! teleopctl - Open Interface robot teleoperation CLI
//!
//! Drives an iRobot Open Interface robot over a serial tether from scripted
//! key events, sends discrete mode commands, and reads raw sensor values.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod error;
mod link;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use oi_teleop_engine::{IntFormat, OiCommand, TeleopError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigCommands, Context};
use crate::config::TeleopConfig;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "teleopctl")]
#[command(about = "Teleoperate an iRobot Open Interface robot over a serial tether")]
#[command(version)]
#[command(long_about = "
teleopctl drives an iRobot Open Interface robot (Create, Roomba) over a
serial link. Held direction keys become Drive Direct wheel speeds; mode keys
send discrete commands. Key events come from a script file or stdin, one
'press <key>' or 'release <key>' per line.

Use --dry-run to echo frames without a robot attached.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (defaults to <config dir>/oi-teleop/config.json)
    #[arg(long, global = true, env = "TELEOPCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Serial port, overriding the config file
    #[arg(long, global = true, env = "TELEOPCTL_PORT")]
    port: Option<String>,

    /// Baud rate, overriding the config file
    #[arg(long, global = true)]
    baud: Option<u32>,

    /// Echo frames without opening a serial port
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List serial ports (nothing is opened)
    Ports,

    /// Show the keybindings
    Keys,

    /// Send one discrete command (passive, safe, full, clean, dock, reset, beep)
    Send {
        command: OiCommand,
    },

    /// Drive from press/release lines read from a file or stdin
    Drive {
        /// Script file; stdin when omitted
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Read one raw sensor value
    Sensor {
        /// Value width and signedness
        #[arg(short, long, default_value = "u8")]
        format: IntFormat,

        /// Decimal request bytes to send first, e.g. "142 7"
        #[arg(short, long)]
        request: Option<String>,
    },

    /// Config file management
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("teleopctl={log_level},oi_teleop_engine={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli);

    // Handle errors with appropriate exit codes
    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    if let Some(cli_error) = e.downcast_ref::<CliError>() {
        return cli_error.exit_code();
    }
    match e.downcast_ref::<TeleopError>() {
        Some(teleop) => CliError::from(teleop.clone()).exit_code(),
        None => 1,
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Ports => commands::ports::execute(cli.json),
        Commands::Keys => commands::keys::execute(cli.json),
        Commands::Send { command } => commands::send::execute(&context(cli)?, *command),
        Commands::Drive { script } => commands::drive::execute(&context(cli)?, script.as_deref()),
        Commands::Sensor { format, request } => {
            commands::sensor::execute(&context(cli)?, *format, request.as_deref())
        }
        Commands::Config(cmd) => commands::config::execute(&context(cli)?, cmd),
    }
}

/// Load the config file and fold in command-line overrides.
fn context(cli: &Cli) -> Result<Context> {
    let config_path = cli.config.clone().or_else(TeleopConfig::default_config_path);

    let loaded = match &config_path {
        Some(path) => TeleopConfig::load_from_path(path),
        None => Ok(TeleopConfig::default()),
    };
    let mut config = match (loaded, &cli.command) {
        (Ok(config), _) => config,
        // A broken file must not block replacing it.
        (Err(e), Commands::Config(ConfigCommands::Init { force: true })) => {
            tracing::warn!(error = %e, "Ignoring unreadable config file");
            TeleopConfig::default()
        }
        (Err(e), _) => {
            return Err(CliError::InvalidConfiguration(format!("{e:#}")).into());
        }
    };

    config.apply_overrides(cli.port.as_deref(), cli.baud);
    config
        .validate()
        .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;

    Ok(Context {
        json: cli.json,
        dry_run: cli.dry_run,
        config,
        config_path,
    })
}
