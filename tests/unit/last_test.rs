//! Unit tests for whole queries against the fixture store

use chrono::Utc;
use wlast::format::TimeStyle;
use wlast::render::HostDisplay;
use wlast::resolve::HostTranslator;
use wlast::store::JsonlStore;
use wlast::window::{Filter, TimeWindow};
use wlast::LastQuery;

use crate::helpers::{fixtures_dir, FIXTURE_START};

const HOUR: u64 = 3_600_000_000;

fn run(query: &LastQuery) -> String {
    let store = JsonlStore::new(fixtures_dir().join("wtmp.jsonl"));
    let mut out = Vec::new();
    let summary = query
        .execute(&store, Utc, FIXTURE_START + 6 * HOUR, HostTranslator::disabled(), &mut out)
        .unwrap();
    assert!(summary.is_some());
    String::from_utf8(out).unwrap()
}

fn rows(output: &str) -> Vec<&str> {
    output.lines().take_while(|l| !l.is_empty()).collect()
}

#[test]
fn reconstructs_fixture_history() {
    let out = run(&LastQuery::default());
    assert_eq!(
        rows(&out),
        [
            "carol    pts/2        build.example.or Fri Mar 15 17:05 - 17:15  (00:10:00)",
            "alice    pts/1        192.0.2.10       Fri Mar 15 16:55 - still logged in",
            "reboot   system boot  6.8.0            Fri Mar 15 16:45 - still running",
            "bob      tty1                          Fri Mar 15 14:05 - crash ",
            "alice    pts/0        10.0.0.7         Fri Mar 15 13:55 - 14:45  (00:50:00)",
            "reboot   system boot  6.7.1            Fri Mar 15 13:45 - 15:45  (02:00:00)",
        ]
    );
    assert!(out.ends_with(" begins Fri Mar 15 13:45:30 2024\n"));
}

#[test]
fn system_flag_adds_shutdown_before_older_boot() {
    let query = LastQuery {
        system: true,
        ..LastQuery::default()
    };
    let out = run(&query);
    let rows = rows(&out);
    assert_eq!(rows.len(), 7);
    assert_eq!(
        rows[5],
        "shutdown system down  6.7.1            Fri Mar 15 15:45 - 16:45  (01:00:00)"
    );
    assert!(rows[6].starts_with("reboot "));
}

#[test]
fn present_selects_sessions_open_at_that_time() {
    let query = LastQuery {
        filter: Filter {
            window: TimeWindow {
                present: Some(FIXTURE_START + 1_470_000_000),
                ..TimeWindow::default()
            },
            ..Filter::default()
        },
        host: HostDisplay::Hidden,
        ..LastQuery::default()
    };
    let users: Vec<String> = rows(&run(&query))
        .iter()
        .map(|r| r.split_whitespace().next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(users, ["bob", "alice", "reboot"]);
}

#[test]
fn open_sessions_in_compact_iso() {
    let query = LastQuery {
        filter: Filter {
            open_only: true,
            ..Filter::default()
        },
        compact: true,
        time_style: Some(TimeStyle::Iso),
        host: HostDisplay::Hidden,
        ..LastQuery::default()
    };
    let out = run(&query);
    assert_eq!(
        rows(&out),
        [
            "alice    pts/1        2024-03-15T16:55:30+0000  .(02:50:00)",
            "reboot   system boot  2024-03-15T16:45:30+0000  .(03:00:00)",
            "bob      tty1         2024-03-15T14:05:30+0000  ?(02:40:00)",
        ]
    );
    assert!(out.ends_with(" begins 2024-03-15T13:45:30+0000\n"));
}

#[test]
fn match_list_with_service_column() {
    let query = LastQuery {
        filter: Filter {
            matches: vec!["alice".to_string()],
            ..Filter::default()
        },
        service: true,
        legacy: true,
        ..LastQuery::default()
    };
    let out = run(&query);
    assert_eq!(
        rows(&out),
        [
            "alice    pts/1        192.0.2.10       sshd         Fri Mar 15 16:55 - still logged in",
            "alice    pts/0        10.0.0.7         sshd         Fri Mar 15 13:55 - 14:45  (00:50)",
        ]
    );
}

#[test]
fn json_output_parses() {
    let query = LastQuery {
        json: true,
        ..LastQuery::default()
    };
    let doc: serde_json::Value = serde_json::from_str(&run(&query)).unwrap();
    let entries = doc["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[3]["user"], "bob");
    assert_eq!(entries[3]["logout"], "crash");
    assert_eq!(entries[3]["length"], "");
    assert_eq!(entries[4]["length"], "00:50:00");
    assert_eq!(doc["start"], "Fri Mar 15 13:45:30 2024");
}
