//! Unit tests for the JSON-lines store

use chrono::Utc;
use wlast::record::{LoginRecord, RecordKind};
use wlast::resolve::HostTranslator;
use wlast::store::{boot_time, JsonlStore, RecordSource};
use wlast::{LastQuery, StoreError};

use crate::helpers::{fixtures_dir, load_fixture, temp_store, FIXTURE_START};

fn fixture() -> JsonlStore {
    JsonlStore::new(fixtures_dir().join("wtmp.jsonl"))
}

#[test]
fn fixture_is_delivered_newest_first() {
    let logins: Vec<u64> = fixture()
        .records(false)
        .unwrap()
        .map(|r| LoginRecord::try_from(r.unwrap()).unwrap().login)
        .collect();
    assert_eq!(logins.len(), 6);
    assert!(logins.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(logins.last(), Some(&FIXTURE_START));
}

#[test]
fn unique_fixture_has_one_row_per_user() {
    let records: Vec<_> = fixture()
        .records(true)
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    let users: Vec<&str> = records.iter().map(|r| r.user.as_str()).collect();
    assert_eq!(users, ["carol", "alice", "reboot", "bob"]);
    assert_eq!(records[1].tty.as_deref(), Some("pts/1"));
    assert_eq!(records[2].kind, RecordKind::BootMarker);
}

#[test]
fn boot_time_of_fixture() {
    assert_eq!(boot_time(&fixture()).unwrap(), FIXTURE_START + 10_800_000_000);
}

#[test]
fn name_is_the_path() {
    let store = fixture();
    assert_eq!(store.name(), store.path().display().to_string());
}

#[test]
fn parse_error_is_terminal_with_line_number() {
    let (_dir, path) = temp_store(&[
        r#"{"type":"user","user":"alice","login":1}"#,
        r#"{"type":"user","user":"bob","login":2}"#,
        r#"{"type":"nobody","user":"eve","login":3}"#,
    ]);
    match JsonlStore::new(&path).records(false) {
        Err(StoreError::Parse { line, .. }) => assert_eq!(line, 3),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unknown record type accepted"),
    }
}

#[test]
fn malformed_numbers_reach_the_reconstructor() {
    let (_dir, path) = temp_store(&[
        r#"{"type":"user","user":"alice","login":"12:00"}"#,
    ]);
    let raw = JsonlStore::new(&path)
        .records(false)
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert!(LoginRecord::try_from(raw).is_err());
}

fn session_rows(store: &JsonlStore) -> Vec<String> {
    let mut out = Vec::new();
    LastQuery::default()
        .execute(store, Utc, FIXTURE_START, HostTranslator::disabled(), &mut out)
        .unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .take_while(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn shuffled_lines_reconstruct_like_ordered_ones() {
    let content = load_fixture("wtmp.jsonl");
    let mut lines: Vec<&str> = content.lines().collect();
    // Newest boot first, oldest session last
    lines.swap(0, 3);
    lines.swap(1, 5);
    let (_dir, path) = temp_store(&lines);

    let shuffled = JsonlStore::new(&path);
    let logins: Vec<u64> = shuffled
        .records(false)
        .unwrap()
        .map(|r| r.unwrap().login.as_usec().unwrap())
        .collect();
    assert!(logins.windows(2).all(|pair| pair[0] >= pair[1]), "{logins:?}");

    let rows = session_rows(&shuffled);
    assert_eq!(rows, session_rows(&fixture()));
    assert_eq!(rows[3], "bob      tty1                          Fri Mar 15 14:05 - crash ");
}
