//! End-to-end tests for the wlast binary against the fixture store

use assert_cmd::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{fixture_store, run_wlast, wlast};

fn store_arg() -> String {
    fixture_store().display().to_string()
}

#[test]
fn last_lists_the_whole_history() {
    let config = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_wlast(&config, &["last", "-f", &store_arg()]);

    assert_eq!(code, 0, "stderr: {stderr}");
    let expected = format!(
        "\
carol    pts/2        build.example.or Fri Mar 15 17:05 - 17:15  (00:10:00)
alice    pts/1        192.0.2.10       Fri Mar 15 16:55 - still logged in
reboot   system boot  6.8.0            Fri Mar 15 16:45 - still running
bob      tty1                          Fri Mar 15 14:05 - crash 
alice    pts/0        10.0.0.7         Fri Mar 15 13:55 - 14:45  (00:50:00)
reboot   system boot  6.7.1            Fri Mar 15 13:45 - 15:45  (02:00:00)

{} begins Fri Mar 15 13:45:30 2024
",
        store_arg()
    );
    assert_eq!(stdout, expected);
}

#[test]
fn system_flag_adds_shutdown_rows() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(&config, &["last", "-x", "-f", &store_arg()]);

    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[5],
        "shutdown system down  6.7.1            Fri Mar 15 15:45 - 16:45  (01:00:00)"
    );
    assert!(lines[6].starts_with("reboot   system boot  6.7.1"));
}

#[test]
fn match_list_selects_users() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(&config, &["last", "-f", &store_arg(), "alice"]);

    assert_eq!(code, 0);
    let rows: Vec<&str> = stdout.lines().take_while(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.starts_with("alice ")));
}

#[test]
fn present_selects_sessions_open_at_that_time() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(
        &config,
        &["last", "-f", &store_arg(), "-p", "2024-03-15 14:10"],
    );

    assert_eq!(code, 0);
    let users: Vec<&str> = stdout
        .lines()
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(users, vec!["bob", "alice", "reboot"]);
}

#[test]
fn since_and_until_bound_the_logins() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(
        &config,
        &[
            "last",
            "-f",
            &store_arg(),
            "-s",
            "2024-03-15 16:00",
            "-t",
            "2024-03-15 17:00",
        ],
    );

    assert_eq!(code, 0);
    let rows: Vec<&str> = stdout.lines().take_while(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("alice    pts/1"));
    assert!(rows[1].starts_with("reboot   system boot  6.8.0"));
}

#[test]
fn limit_caps_the_listing() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(&config, &["last", "-n", "1", "-f", &store_arg()]);

    assert_eq!(code, 0);
    assert!(stdout.starts_with("carol    pts/2"));
    assert_eq!(stdout.lines().take_while(|l| !l.is_empty()).count(), 1);
    assert!(stdout.contains("begins Fri Mar 15 13:45:30 2024"));
}

#[test]
fn compact_environment_variable_switches_layout() {
    let config = TempDir::new().unwrap();
    wlast(&config)
        .env("LAST_COMPACT", "1")
        .args(["last", "-f", &store_arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-15 17:05:30"))
        .stdout(predicate::str::contains("still logged in").not());
}

#[test]
fn invalid_time_value_fails() {
    let config = TempDir::new().unwrap();
    let (stdout, stderr, code) =
        run_wlast(&config, &["last", "-f", &store_arg(), "-s", "next week"]);

    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid time value 'next week'"), "stderr: {stderr}");
}

#[test]
fn invalid_time_format_fails() {
    let config = TempDir::new().unwrap();
    let (_, stderr, code) = run_wlast(
        &config,
        &["last", "-f", &store_arg(), "--time-format", "ctime"],
    );

    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid time format 'ctime'"));
}

#[test]
fn conflicting_host_options_are_rejected() {
    let config = TempDir::new().unwrap();
    let (_, stderr, code) = run_wlast(&config, &["last", "-a", "-R", "-f", &store_arg()]);

    assert_eq!(code, 2);
    assert!(stderr.contains("cannot be used with"));
}

#[test]
fn missing_store_is_an_error() {
    let config = TempDir::new().unwrap();
    let missing = config.path().join("absent.jsonl");
    wlast(&config)
        .args(["last", "-f"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn empty_window_prints_nothing() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(
        &config,
        &[
            "last",
            "-f",
            &store_arg(),
            "-s",
            "2024-03-16",
            "-t",
            "2024-03-15",
        ],
    );

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn boottime_reports_latest_boot() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(&config, &["boottime", "-f", &store_arg()]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "system boot Fri Mar 15 16:45:30 2024\n");
}

#[test]
fn config_file_supplies_display_defaults() {
    let config = TempDir::new().unwrap();
    std::fs::write(
        config.path().join("config.toml"),
        "[display]\nnohostname = true\n",
    )
    .unwrap();

    let (stdout, _, code) = run_wlast(&config, &["last", "-n", "1", "-f", &store_arg()]);

    assert_eq!(code, 0);
    assert!(stdout.starts_with("carol    pts/2        Fri Mar 15 17:05 - 17:15  (00:10:00)\n"));
}

#[test]
fn config_show_prints_effective_config() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(&config, &["config", "show"]);

    assert_eq!(code, 0);
    assert!(stdout.starts_with("# "));
    assert!(stdout.contains("[store]"));
    assert!(stdout.contains("/var/lib/wtmpdb/wtmp.jsonl"));
}

#[test]
fn version_flag_prints_package_version() {
    Command::cargo_bin("wlast")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "wlast {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn raw_time_format_prints_epoch_seconds() {
    let config = TempDir::new().unwrap();
    let (stdout, _, code) = run_wlast(
        &config,
        &["last", "-R", "-n", "1", "--time-format", "raw", "-f", &store_arg()],
    );

    assert_eq!(code, 0);
    assert!(stdout.starts_with("carol    pts/2        1710522330 - 1710522930  (00:10:00)\n"));
    assert!(stdout.ends_with(" begins 1710510330\n"));
}
