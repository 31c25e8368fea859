//! 命令行端到端测试

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("teleop-cli").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

fn init_config(path: &Path) {
    cli()
        .args(["config", "init", "--config"])
        .arg(path)
        .assert()
        .success();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    init_config(&path);
    assert!(path.exists());

    cli()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cli()
        .args(["config", "init", "--force", "--config"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_config_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    init_config(&path);

    cli()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("destination = \"192.168.1.75:12345\""))
        .stdout(predicate::str::contains("[stepper]"));
}

#[test]
fn test_fk_one_link() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    init_config(&path);

    cli()
        .args(["fk", "--links", "1", "--degrees", "90", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"end_effector\""))
        .stdout(predicate::str::contains("1R"));
}

#[test]
fn test_fk_rejects_three_angles() {
    cli().args(["fk", "0", "0", "0"]).assert().failure();
}

#[test]
fn test_listen_rejects_bad_idle_timeout() {
    for value in ["--idle-timeout=nan", "--idle-timeout=-1", "--idle-timeout=1e300"] {
        cli()
            .args(["listen", "--bind", "127.0.0.1:0", value])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid"));
    }
}

#[test]
fn test_render_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let output = dir.path().join("robot.png");
    init_config(&config);

    cli()
        .args(["render", "--axes", "0.5", "-0.25", "--config"])
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_demo_dry_run_prints_one_payload_per_frame() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    init_config(&config);

    let output = cli()
        .args(["run", "--demo", "--dry-run", "--no-render", "-n", "12", "--config"])
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    for line in lines {
        line.parse::<f64>().unwrap();
    }
}

#[test]
fn test_demo_power_mode() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    init_config(&config);

    cli()
        .args([
            "run", "--demo", "--dry-run", "--no-render", "--mode", "power", "-n", "3", "--config",
        ])
        .arg(&config)
        .assert()
        .success()
        .stdout("0\n0\n8\n");
}
