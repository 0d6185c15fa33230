//! Binary-level tests for the CLI surface.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run the binary from an isolated directory with an isolated config home,
/// so no real config file or working-directory config.yaml leaks in.
fn tubescript(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tubescript").unwrap();
    cmd.current_dir(dir.path());
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"));
    cmd.env("HOME", dir.path());
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    tubescript(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn fetch_rejects_unresolvable_url() {
    let dir = TempDir::new().unwrap();
    tubescript(&dir)
        .args(["fetch", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not extract video ID"));
}

#[test]
fn analyze_rejects_unresolvable_url() {
    let dir = TempDir::new().unwrap();
    tubescript(&dir)
        .args(["analyze", "https://example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not extract video ID"));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    tubescript(&dir)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Language: en"))
        .stdout(predicate::str::contains("Synopsis Sentences: 5"));
}

#[test]
fn config_points_at_config_file() {
    let dir = TempDir::new().unwrap();
    tubescript(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn first_run_creates_config_file() {
    let dir = TempDir::new().unwrap();
    tubescript(&dir).args(["config", "--show"]).assert().success();

    let created = dir
        .path()
        .join("config")
        .join("tubescript")
        .join("config.yaml");
    assert!(created.exists());
}
