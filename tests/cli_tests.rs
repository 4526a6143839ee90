//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn repo_flatten(cwd: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-flatten"));
    // Keep config discovery and credentials out of the test environment.
    cmd.current_dir(cwd.path());
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("repo-flatten"));
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Flatten a GitHub repository"))
        .stdout(predicate::str::contains("flatten"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_flatten_requires_a_source() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.args(["flatten", "--subdir", "src"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Either --archive or both --owner and --repo"));
}

#[test]
fn test_flatten_rejects_archive_combined_with_remote() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.args([
        "flatten",
        "--archive",
        "snapshot.zip",
        "--owner",
        "octo",
        "--repo",
        "demo",
        "--subdir",
        "src",
    ]);
    cmd.assert().failure().stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_flatten_requires_subdir() {
    let dir = TempDir::new().expect("temp dir");
    let archive = dir.path().join("empty.zip");
    std::fs::write(&archive, b"placeholder").expect("write placeholder");

    let mut cmd = repo_flatten(&dir);
    cmd.args(["flatten", "--archive", archive.to_str().expect("utf8 path")]);
    cmd.assert().failure().stderr(predicate::str::contains("--subdir must be specified"));
}

#[test]
fn test_flatten_rejects_separator_only_subdir() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.args(["flatten", "--archive", "snapshot.zip", "--subdir", "//"]);
    cmd.assert().failure().stderr(predicate::str::contains("must name a subdirectory"));
}

#[test]
fn test_flatten_rejects_invalid_owner() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.args(["flatten", "--owner", "-bad-", "--repo", "demo", "--subdir", "src"]);
    cmd.assert().failure().stderr(predicate::str::contains("invalid owner"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.args(["flatten", "--config", "/nonexistent/repo-flatten.toml", "--subdir", "src"]);
    cmd.assert().failure().stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_completions_generate_for_bash() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = repo_flatten(&dir);
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("repo-flatten"));
}
