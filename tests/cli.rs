//! CLI integration tests: stdin mode, file mode, and failure paths.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_compdoc")))
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn stdin_mode_prints_entity_json() {
    let snapshot = fs::read_to_string(fixture_path("button.json")).unwrap();

    cmd()
        .write_stdin(snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"displayName\": \"FancyButton\""))
        .stdout(predicate::str::contains("\"label\""));
}

#[test]
fn stdin_mode_enum_literals_flag() {
    let snapshot = fs::read_to_string(fixture_path("button.json")).unwrap();

    cmd()
        .arg("--enum-literals")
        .write_stdin(snapshot.clone())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"enum\""))
        .stdout(predicate::str::contains("\\\"primary\\\""));

    // Without the flag the union stays a plain display string.
    cmd()
        .write_stdin(snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"enum\"").not());
}

#[test]
fn stdin_mode_rejects_malformed_snapshot() {
    cmd()
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse snapshot"));
}

#[test]
fn file_mode_writes_one_output_per_snapshot() {
    let out = TempDir::new().unwrap();

    cmd()
        .arg("-o")
        .arg(out.path())
        .arg(fixture_path("button.json"))
        .arg(fixture_path("widget.json"))
        .assert()
        .success();

    let button = fs::read_to_string(out.path().join("button.json")).unwrap();
    assert!(button.contains("\"displayName\": \"FancyButton\""));

    let widget = fs::read_to_string(out.path().join("widget.json")).unwrap();
    assert!(widget.contains("\"displayName\": \"Widget\""));
    assert!(widget.contains("\"measure\""));
}

#[test]
fn file_mode_requires_output_dir() {
    cmd()
        .arg(fixture_path("button.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn file_mode_accepts_directory_argument() {
    let out = TempDir::new().unwrap();
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

    cmd()
        .arg("-o")
        .arg(out.path())
        .arg(&fixtures)
        .assert()
        .success();

    assert!(out.path().join("button.json").is_file());
    assert!(out.path().join("widget.json").is_file());
    assert!(out.path().join("dedup.json").is_file());
}

#[test]
fn file_mode_warns_on_unmatched_pattern() {
    let out = TempDir::new().unwrap();

    cmd()
        .arg("-o")
        .arg(out.path())
        .arg("no-such-dir/*.json")
        .assert()
        .success()
        .stderr(predicate::str::contains("no files matched"));
}

#[test]
fn file_mode_fails_on_malformed_snapshot() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let bad = input.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();

    cmd()
        .arg("-o")
        .arg(out.path())
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load snapshot"));
}
