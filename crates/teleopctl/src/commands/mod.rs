//! Command implementations for teleopctl

pub mod config;
pub mod drive;
pub mod keys;
pub mod ports;
pub mod send;
pub mod sensor;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Options shared by every command that touches the robot.
#[derive(Debug, Clone)]
pub struct Context {
    pub json: bool,
    pub dry_run: bool,
    pub config: crate::config::TeleopConfig,
    pub config_path: Option<PathBuf>,
}
