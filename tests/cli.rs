use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// The binary with a config path that does not exist, so the user's own config
/// never leaks into a test.
fn harmonizer(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("harmonizer").unwrap();
    cmd.arg("--config").arg(dir.path().join("none.toml"));
    cmd
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("harmonizer").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("legend"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn legend_by_variable_lists_folded_entries() {
    let dir = TempDir::new().unwrap();
    harmonizer(&dir)
        .args(["legend", "--mode", "variable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Legend mode: VARIABLE"))
        .stdout(predicate::str::contains("Actuals  [4]  total=5,150"))
        .stdout(predicate::str::contains("Plan 2024  [4]  total=5,050"));
}

#[test]
fn legend_json_is_parseable() {
    let dir = TempDir::new().unwrap();
    let out = harmonizer(&dir)
        .args(["legend", "--mode", "version", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["label"], "Q1 2024");
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    harmonizer(&dir)
        .args(["legend", "--mode", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("colour"));
}

#[test]
fn config_prints_chart_json() {
    let dir = TempDir::new().unwrap();
    harmonizer(&dir)
        .args(["config", "--mode", "version", "--policy", "native-grouped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"native-grouped\""))
        .stdout(predicate::str::contains("\"mode\": \"version\""));
}

#[test]
fn render_writes_svg() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("chart.svg");
    harmonizer(&dir)
        .args(["render", "--placement", "overlay", "--mode", "variable-version", "--out"])
        .arg(&out)
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("<svg"));
}

#[test]
fn export_then_reuse_dataset() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("data.csv");
    harmonizer(&dir).args(["export", "--out"]).arg(&csv).assert().success();
    harmonizer(&dir)
        .arg("--data")
        .arg(&csv)
        .args(["legend", "--mode", "variable-version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Actuals • Q4 2024"));
}

#[test]
fn config_file_sets_default_mode() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("config.toml");
    fs::write(&cfg, "default_mode = \"version\"\n").unwrap();
    let mut cmd = Command::cargo_bin("harmonizer").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("legend")
        .assert()
        .success()
        .stdout(predicate::str::contains("Legend mode: VERSION"));
}
