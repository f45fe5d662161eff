//! Startup tests for the backlog-mcp binary.
//!
//! The server must refuse to start without credentials, before it reads any
//! MCP message from stdin.

use rstest::rstest;
use std::process::{Command, Output, Stdio};

/// Run the binary with a clean `BACKLOG_*` and `RUST_LOG` environment plus `env`.
fn run_with_env(env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_backlog-mcp"));
    for (key, _) in std::env::vars() {
        if key.starts_with("BACKLOG_") || key == "RUST_LOG" {
            command.env_remove(key);
        }
    }
    command
        .envs(env.iter().copied())
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute backlog-mcp binary")
}

#[rstest]
#[case::nothing_set(&[], "--api-token")]
#[case::missing_token(&[("BACKLOG_SPACE", "acme")], "--api-token")]
#[case::missing_space(&[("BACKLOG_API_TOKEN", "key")], "--space")]
#[case::empty_token(&[("BACKLOG_API_TOKEN", ""), ("BACKLOG_SPACE", "acme")], "api-token")]
fn test_missing_configuration_exits_with_error(
    #[case] env: &[(&str, &str)],
    #[case] mentioned: &str,
) {
    let output = run_with_env(env);

    assert!(!output.status.success(), "server should not start");
    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(mentioned), "stderr was: {stderr}");
    assert!(
        output.stdout.is_empty(),
        "nothing may be written to the protocol stream"
    );
}

#[rstest]
#[case::one("1")]
#[case::zero("0")]
#[case::yes("yes")]
#[case::off("off")]
#[case::true_word("true")]
fn test_full_attachment_data_env_accepts_boolish_values(#[case] value: &str) {
    let output = run_with_env(&[
        ("BACKLOG_API_TOKEN", "key"),
        ("BACKLOG_SPACE", "acme"),
        ("BACKLOG_FULL_ATTACHMENT_DATA", value),
    ]);

    // stdin is closed, so serving ends right away; configuration must still load.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_ne!(output.status.code(), Some(2), "stderr was: {stderr}");
    assert!(stderr.contains("Backlog MCP server ready"), "stderr was: {stderr}");
}

#[test]
fn test_full_attachment_data_env_rejects_unknown_value() {
    let output = run_with_env(&[
        ("BACKLOG_API_TOKEN", "key"),
        ("BACKLOG_SPACE", "acme"),
        ("BACKLOG_FULL_ATTACHMENT_DATA", "maybe"),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("full-attachment-data"), "stderr was: {stderr}");
}

#[test]
fn test_invalid_space_exits_with_error() {
    let output = run_with_env(&[("BACKLOG_API_TOKEN", "key"), ("BACKLOG_SPACE", "bad/space")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("space"), "stderr was: {stderr}");
}

#[test]
fn test_help_mentions_environment_variables() {
    let output = Command::new(env!("CARGO_BIN_EXE_backlog-mcp"))
        .arg("--help")
        .output()
        .expect("Failed to execute backlog-mcp binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BACKLOG_API_TOKEN"));
    assert!(stdout.contains("BACKLOG_SPACE"));
}
