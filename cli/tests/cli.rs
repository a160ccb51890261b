//! End-to-end tests of the remote-console binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn console(dir: &Path) -> Command {
    let config = dir.join("remote-console.json");
    std::fs::write(&config, r#"{ "api_url": "http://127.0.0.1:9" }"#).unwrap();

    let mut cmd = Command::cargo_bin("remote-console").unwrap();
    cmd.current_dir(dir)
        .env_remove("REMOTE_CONSOLE_API_URL")
        .env_remove("REMOTE_CONSOLE_ANCHOR")
        .env_remove("REMOTE_CONSOLE_START")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

#[test]
fn routes_lists_every_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let mut assert = console(dir.path()).arg("routes").assert().success();
    for pattern in [
        "/environments",
        "/create-environment",
        "/environment/:id/show",
        "/environment/:id/delete",
        "/simulations",
        "/create-simulation",
        "/simulation/:id/show",
        "/simulation/:id/delete",
        "/runs",
    ] {
        assert = assert.stdout(predicate::str::contains(pattern));
    }
}

#[test]
fn version_flag_reports_the_library_version() {
    let dir = tempfile::tempdir().unwrap();
    console(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(remote_console_core::VERSION));
}

#[test]
fn resolve_extracts_the_id() {
    let dir = tempfile::tempdir().unwrap();
    console(dir.path())
        .args(["resolve", "/simulation/7/delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DeleteSimulation"))
        .stdout(predicate::str::contains("id = 7"));
}

#[test]
fn resolve_unknown_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    console(dir.path())
        .args(["resolve", "/does-not-exist"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Route Not Found"))
        .stderr(predicate::str::contains("No route matches"));
}

#[test]
fn open_offline_lists_sample_environments() {
    let dir = tempfile::tempdir().unwrap();
    console(dir.path())
        .args(["--offline", "open", "#/environments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ivt-nama"))
        .stdout(predicate::str::contains("euler"));
}

#[test]
fn open_offline_creates_environment() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = format!("path={}", dir.path().display());
    console(dir.path())
        .args([
            "--offline",
            "open",
            "/create-environment",
            "--set",
            "id=lab",
            "--set",
            "type=local",
            "--set",
            runtime.as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created environment 'lab'"))
        .stdout(predicate::str::contains("Type    local"));
}

#[test]
fn open_offline_rejects_relative_runtime_directory() {
    let dir = tempfile::tempdir().unwrap();
    console(dir.path())
        .args([
            "--offline",
            "open",
            "/create-environment",
            "--set",
            "id=lab",
            "--set",
            "type=local",
            "--set",
            "path=relative/dir",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Runtime directory should be absolute: relative/dir",
        ));
}

#[test]
fn open_offline_delete_needs_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    console(dir.path())
        .args(["--offline", "open", "/environment/euler/delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete environment Euler (euler)?"))
        .stdout(predicate::str::contains("--yes"));

    console(dir.path())
        .args(["--offline", "open", "/environment/euler/delete", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted environment 'euler'"))
        .stdout(predicate::str::contains("ivt-nama"));
}

#[test]
fn interactive_without_terminal_fails_to_mount() {
    let dir = tempfile::tempdir().unwrap();
    console(dir.path())
        .arg("--offline")
        .assert()
        .failure()
        .stderr(predicate::str::contains("#app"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.json");
    std::fs::write(&config, r#"{ "api_url": "ftp://example.com" }"#).unwrap();
    Command::cargo_bin("remote-console")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("REMOTE_CONSOLE_API_URL")
        .args(["--offline", "--config"])
        .arg(&config)
        .args(["open", "/runs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}
