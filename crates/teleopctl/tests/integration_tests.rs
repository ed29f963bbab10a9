//! Integration tests for teleopctl
//!
//! Everything runs with `--dry-run` or against a temporary config file, so
//! no robot or serial port is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Custom predicate to check if output is valid JSON
fn is_json() -> impl predicates::Predicate<[u8]> {
    predicates::function::function(|s: &[u8]| {
        if let Ok(text) = std::str::from_utf8(s) {
            serde_json::from_str::<Value>(text).is_ok()
        } else {
            false
        }
    })
}

/// teleopctl with an isolated, initially absent config file.
fn teleopctl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("teleopctl").unwrap();
    cmd.env_remove("TELEOPCTL_PORT")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.path().join("config.json"));
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    teleopctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Open Interface"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    teleopctl(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("teleopctl"));
}

#[test]
fn test_keys_lists_bindings() {
    let dir = TempDir::new().unwrap();
    teleopctl(&dir)
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("Supported Keys:"))
        .stdout(predicate::str::contains("Space\tBeep"))
        .stdout(predicate::str::contains("WASD\tMotion"));
}

#[test]
fn test_keys_json() {
    let dir = TempDir::new().unwrap();
    let output = teleopctl(&dir)
        .args(["--json", "keys"])
        .assert()
        .success()
        .stdout(is_json())
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["keys"].as_array().map(Vec::len), Some(8));
    assert_eq!(value["keys"][0]["key"], "E");
    assert_eq!(value["keys"][0]["action"], "Passive");
}

mod send {
    use super::*;

    #[test]
    fn test_send_beep_dry_run_echoes_bytes() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "send", "beep"])
            .assert()
            .success()
            .stdout(predicate::str::diff("140 3 1 64 16 141 3\n"));
    }

    #[test]
    fn test_send_json_reports_bytes() {
        let dir = TempDir::new().unwrap();
        let output = teleopctl(&dir)
            .args(["--json", "--dry-run", "send", "SAFE"])
            .assert()
            .success()
            .stdout(is_json())
            .get_output()
            .stdout
            .clone();

        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["command"], "safe");
        assert_eq!(value["bytes"], serde_json::json!([131]));
    }

    #[test]
    fn test_send_unknown_command_is_usage_error() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "send", "warp"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("warp"));
    }

    #[test]
    fn test_send_without_port_is_not_connected() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["send", "safe"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("no serial port configured"));
    }

    #[test]
    fn test_send_to_missing_port_is_not_connected() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--port", "/dev/oi-teleop-missing", "send", "safe"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("/dev/oi-teleop-missing"));
    }
}

mod drive {
    use super::*;

    #[test]
    fn test_drive_script_from_stdin() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "drive"])
            .write_stdin("press w\npress w\npress a\nrelease a\nrelease w\n")
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "145 0 150 0 150\n145 0 200 0 100\n145 0 150 0 150\n145 0 0 0 0\n",
            ))
            .stderr(predicate::str::contains("5 key events, 4 frames sent"));
    }

    #[test]
    fn test_drive_script_file_json() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("moves.txt");
        fs::write(&script, "# spin right\n+d\n+space\n-d\n").unwrap();

        let output = teleopctl(&dir)
            .args(["--json", "--dry-run", "drive", "--script"])
            .arg(&script)
            .assert()
            .success()
            .stdout(is_json())
            .get_output()
            .stdout
            .clone();

        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["events"], 3);
        assert_eq!(value["sent"], 3);
        assert_eq!(
            value["frames"],
            serde_json::json!(["145 255 206 0 50", "140 3 1 64 16 141 3", "145 0 0 0 0"])
        );
    }

    #[test]
    fn test_drive_bad_line_reports_line_number() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "drive"])
            .write_stdin("press w\nhold s\n")
            .assert()
            .failure()
            .code(4)
            .stderr(predicate::str::contains("line 2"));
    }

    #[test]
    fn test_drive_missing_script_file() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "drive", "--script"])
            .arg(dir.path().join("absent.txt"))
            .assert()
            .failure()
            .code(4);
    }
}

mod sensor {
    use super::*;

    #[test]
    fn test_sensor_read_times_out_in_dry_run() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "sensor", "--format", "u16", "--request", "142 22"])
            .assert()
            .failure()
            .code(5)
            .stderr(predicate::str::contains("expected 2, got 0"));
    }

    #[test]
    fn test_sensor_timeout_json_error_type() {
        let dir = TempDir::new().unwrap();
        let output = teleopctl(&dir)
            .args(["--json", "--dry-run", "sensor", "--format", "i16"])
            .assert()
            .failure()
            .code(5)
            .stdout(is_json())
            .get_output()
            .stdout
            .clone();

        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["error"]["type"], "ConnectionLost");
    }

    #[test]
    fn test_sensor_bad_request_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "sensor", "--request", "142 300"])
            .assert()
            .failure()
            .code(4);
    }

    #[test]
    fn test_sensor_bad_format_is_usage_error() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--dry-run", "sensor", "--format", "u32"])
            .assert()
            .failure()
            .code(2);
    }
}

mod config {
    use super::*;

    #[test]
    fn test_config_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir)
            .args(["--port", "/dev/ttyUSB0", "config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Wrote"));

        let text = fs::read_to_string(dir.path().join("config.json")).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["schema_version"], "oi.teleop/1");
        assert_eq!(value["serial"]["port"], "/dev/ttyUSB0");
        assert_eq!(value["serial"]["baud_rate"], 115_200);
        assert_eq!(value["drive"]["velocity_change"], 150);
        assert_eq!(value["drive"]["rotation_change"], 100);
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        teleopctl(&dir).args(["config", "init"]).assert().success();
        teleopctl(&dir)
            .args(["config", "init"])
            .assert()
            .failure()
            .code(4)
            .stderr(predicate::str::contains("--force"));
        teleopctl(&dir)
            .args(["config", "init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn test_config_show_applies_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{ "serial": { "port": "COM3" }, "drive": { "velocity_change": 300 } }"#,
        )
        .unwrap();

        let output = teleopctl(&dir)
            .args(["--json", "--baud", "57600", "config", "show"])
            .assert()
            .success()
            .stdout(is_json())
            .get_output()
            .stdout
            .clone();

        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["config"]["serial"]["port"], "COM3");
        assert_eq!(value["config"]["serial"]["baud_rate"], 57_600);
        assert_eq!(value["config"]["drive"]["velocity_change"], 300);
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{ "serial": { "baud_rate": 0 } }"#,
        )
        .unwrap();

        let output = teleopctl(&dir)
            .args(["--json", "--dry-run", "send", "beep"])
            .assert()
            .failure()
            .code(4)
            .stdout(is_json())
            .get_output()
            .stdout
            .clone();

        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["type"], "InvalidConfiguration");
        assert!(
            value["error"]["message"]
                .as_str()
                .is_some_and(|m| m.contains("Invalid baud rate: 0"))
        );
    }

    #[test]
    fn test_drive_uses_configured_magnitudes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{ "drive": { "velocity_change": 300, "rotation_change": 200 } }"#,
        )
        .unwrap();

        teleopctl(&dir)
            .args(["--dry-run", "drive"])
            .write_stdin("press w\npress a\n")
            .assert()
            .success()
            .stdout(predicate::str::diff("145 1 44 1 44\n145 1 144 0 200\n"));
    }
}
