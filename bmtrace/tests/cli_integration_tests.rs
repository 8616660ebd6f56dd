// bmtrace/tests/cli_integration_tests.rs
//! End-to-end tests for the `bmtrace` binary.
//!
//! These run the real executable with `assert_cmd`, so the stderr sink is the
//! child's actual standard error stream. `BLUEMIX_TRACE` and `RUST_LOG` are
//! removed from the child's environment so the host's settings cannot leak in.

use anyhow::Result;
use assert_cmd::Command;
use assert_cmd::assert::Assert;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const INPUT: &str = "Authorization: Bearer abc123\nfoo=1&password=secret&bar=2\n{\"apikey\": \"xyz987\"}\n";

fn bmtrace() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("bmtrace"));
    cmd.env_remove("BLUEMIX_TRACE");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(input: &str, args: &[&str]) -> Assert {
    bmtrace().args(args).write_stdin(input).assert()
}

#[test]
fn test_true_traces_sanitized_lines_to_stderr() {
    bmtrace()
        .env("BLUEMIX_TRACE", "TRUE")
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Authorization: [PRIVATE DATA HIDDEN]\n"))
        .stderr(predicate::str::contains("foo=1&password=[PRIVATE DATA HIDDEN]&bar=2\n"))
        .stderr(predicate::str::contains("{\"apikey\":\"[PRIVATE DATA HIDDEN]\"}\n"))
        .stderr(predicate::str::contains("abc123").not())
        .stderr(predicate::str::contains("secret").not())
        .stderr(predicate::str::contains("xyz987").not());
}

#[test]
fn test_disabled_trace_prints_nothing() {
    for value in ["", "false", "False"] {
        run_with_stdin(INPUT, &["--trace", value])
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::is_empty());
    }
}

#[test]
fn test_unset_variable_prints_nothing() {
    run_with_stdin(INPUT, &[])
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_file_trace_appends_across_runs() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("trace.log");
    let path_arg = path.to_str().unwrap();

    run_with_stdin("first=1\n", &["--trace", path_arg]).success();
    bmtrace()
        .env("BLUEMIX_TRACE", path_arg)
        .write_stdin("token=abc&second=2\n")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(&path)?,
        "first=1\ntoken=[PRIVATE DATA HIDDEN]&second=2\n"
    );
    Ok(())
}

#[test]
fn test_unwritable_trace_file_falls_back_to_stderr() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("missing-dir").join("trace.log");
    let path_arg = path.to_str().unwrap();

    run_with_stdin("password=hunter2\n", &["--trace", path_arg])
        .success()
        .stderr(predicate::str::contains(format!(
            "An error occurred when creating log file '{}':\n",
            path_arg
        )))
        .stderr(predicate::str::contains("Cannot open trace file").not())
        .stderr(predicate::str::contains(path_arg).count(1))
        .stderr(predicate::str::contains("password=[PRIVATE DATA HIDDEN]\n"))
        .stderr(predicate::str::contains("hunter2").not());

    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_raw_mode_keeps_secrets() {
    run_with_stdin("token=abc\n", &["--trace", "true", "--raw"])
        .success()
        .stderr(predicate::str::contains("token=abc\n"));
}

#[test]
fn test_stats_reports_per_rule_counts() {
    run_with_stdin(INPUT, &["--stats"])
        .success()
        .stdout(predicate::str::contains("auth_header: 1\n"))
        .stdout(predicate::str::contains("secret_param: 1\n"))
        .stdout(predicate::str::contains("secret_json_field: 1\n"));
}

#[test]
fn test_input_files_are_read_in_order() -> Result<()> {
    let dir = tempdir()?;
    let first = dir.path().join("a.txt");
    let second = dir.path().join("b.txt");
    let out = dir.path().join("out.log");
    fs::write(&first, "X-Auth-Token: t0k\n")?;
    fs::write(&second, "done\n")?;

    bmtrace()
        .arg("--trace")
        .arg(&out)
        .arg(&first)
        .arg(&second)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out)?,
        "X-Auth-Token: [PRIVATE DATA HIDDEN]\ndone\n"
    );
    Ok(())
}

#[test]
fn test_missing_input_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("nope.txt");

    bmtrace()
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
    Ok(())
}
