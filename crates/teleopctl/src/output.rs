//! Output formatting for CLI responses

use std::path::Path;

use anyhow::Error;
use colored::*;
use oi_teleop_engine::serial::PortInfo;
use oi_teleop_engine::{CommandFrame, KEYBIND_HELP, OiCommand, SensorReading, TeleopError};
use serde_json::json;

use crate::config::TeleopConfig;
use crate::error::CliError;

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {what} as JSON: {e}"),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    if let Some(cli) = error.downcast_ref::<CliError>() {
        return cli.kind();
    }
    match error.downcast_ref::<TeleopError>() {
        Some(teleop) => teleop.kind(),
        None => "Other",
    }
}

pub fn print_ports(ports: &[PortInfo], json: bool) {
    if json {
        print_json(&json!({ "success": true, "ports": ports }), "port list");
        return;
    }

    if ports.is_empty() {
        println!("{}", "No serial ports found".yellow());
        return;
    }

    println!("{}", "Serial Ports:".bold());
    for port in ports {
        println!("  {} {}", port.name.bold(), format!("({})", port.kind).dimmed());
    }
}

/// `(key, action)` pairs from the keybind help table.
pub fn keybindings() -> Vec<(&'static str, &'static str)> {
    KEYBIND_HELP
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .collect()
}

pub fn print_keys(json: bool) {
    if json {
        let keys: Vec<_> = keybindings()
            .into_iter()
            .map(|(key, action)| json!({ "key": key, "action": action }))
            .collect();
        print_json(&json!({ "success": true, "keys": keys }), "key list");
    } else {
        print!("{KEYBIND_HELP}");
    }
}

pub fn print_command_sent(cmd: OiCommand, frame: &CommandFrame, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "command": cmd.name(),
                "bytes": frame.as_bytes(),
            }),
            "command result",
        );
    }
}

/// `frames` holds the echoed frames; in human mode they were already printed.
pub fn print_drive_summary(events: usize, sent: usize, frames: &[String], json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "events": events,
                "sent": sent,
                "frames": frames,
            }),
            "drive summary",
        );
    } else {
        eprintln!("{} {events} key events, {sent} frames sent", "✓".green());
    }
}

pub fn print_reading(reading: &SensorReading, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "format": reading.format().to_string(),
                "value": reading.value(),
            }),
            "sensor reading",
        );
    } else {
        println!("{}", reading.value());
    }
}

pub fn print_config(config: &TeleopConfig, path: Option<&Path>, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "path": path,
                "config": config,
            }),
            "config",
        );
        return;
    }

    match path {
        Some(path) => println!("{} {}", "Config:".bold(), path.display()),
        None => println!("{} {}", "Config:".bold(), "(defaults)".dimmed()),
    }
    println!("  Schema: {}", config.schema_version);
    println!(
        "  Port: {}",
        config.serial.port.as_deref().unwrap_or("(not set)")
    );
    println!("  Baud rate: {}", config.serial.baud_rate);
    println!("  Read timeout: {} ms", config.serial.read_timeout_ms);
    println!("  Velocity change: {}", config.drive.velocity_change);
    println!("  Rotation change: {}", config.drive.rotation_change);
}

pub fn print_success(message: &str, json: bool) {
    if json {
        print_json(&json!({ "success": true, "message": message }), "result");
    } else {
        println!("{} {}", "✓".green(), message);
    }
}
