//! Integration tests for the jira-mcp binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with credentials removed and the home directory sandboxed
fn jira_mcp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jira-mcp").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("ATLASSIAN_HOST")
        .env_remove("ATLASSIAN_EMAIL")
        .env_remove("ATLASSIAN_TOKEN")
        .env_remove("RUST_LOG")
        .env_remove("JIRA_MCP_LOG_FILE")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_help_lists_serve() {
    let home = TempDir::new().unwrap();
    jira_mcp(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let home = TempDir::new().unwrap();
    jira_mcp(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    jira_mcp(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_serve_without_credentials_exits_with_config_error() {
    let home = TempDir::new().unwrap();
    jira_mcp(&home)
        .args(["serve", "--http-port", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing required environment variables"))
        .stderr(predicate::str::contains("ATLASSIAN_TOKEN"));
}

#[test]
fn test_stdio_mode_logs_to_file() {
    let home = TempDir::new().unwrap();
    jira_mcp(&home)
        .arg("serve")
        .write_stdin("")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    let log = std::fs::read_to_string(home.path().join(".jira-mcp").join("mcp.log")).unwrap();
    assert!(log.contains("Starting Jira MCP server"));
}

#[test]
fn test_missing_env_file_is_config_error() {
    let home = TempDir::new().unwrap();
    jira_mcp(&home)
        .args(["serve", "--http-port", "0", "--env", "missing.env"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load env file"));
}

#[test]
fn test_invalid_port_is_usage_error() {
    let home = TempDir::new().unwrap();
    jira_mcp(&home)
        .args(["serve", "--http-port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
