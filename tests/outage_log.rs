use aurora::clock::{FixedClock, SharedClock};
use aurora::{Error, OutageLog, OutageRecord, ParseError};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn ts(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
}

fn clock() -> SharedClock {
    Arc::new(FixedClock(ts(20, 0)))
}

#[test]
fn single_outage_statistics() {
    let mut log = OutageLog::with_clock(TimeDelta::days(30), clock());
    log.add_outage(OutageRecord::new(ts(1, 0), ts(1, 1)));

    assert_eq!(log.count(), 1);
    assert_eq!(log.last_outage().unwrap().duration(), TimeDelta::hours(1));
}

#[test]
fn largest_gap_between_consecutive_outages() {
    let mut log = OutageLog::with_clock(TimeDelta::days(30), clock());
    // fins/inícios separados por 2h, 5h e 1h
    log.add_outage(OutageRecord::new(ts(2, 0), ts(2, 1)));
    log.add_outage(OutageRecord::new(ts(2, 3), ts(2, 4)));
    log.add_outage(OutageRecord::new(ts(2, 9), ts(2, 10)));
    log.add_outage(OutageRecord::new(ts(2, 11), ts(2, 12)));

    assert_eq!(log.max_uptime_gap(), TimeDelta::hours(5));
    assert_eq!(log.max_outage_duration(), TimeDelta::hours(1));
}

#[test]
fn admission_horizon_and_recent_counter() {
    let now = ts(20, 0);
    let mut log = OutageLog::with_clock(TimeDelta::days(30), clock());

    let recent = [1, 6, 23];
    let old = [3, 10];
    let ancient = [31, 45];
    for h in recent {
        let end = now - TimeDelta::hours(h);
        log.add_outage(OutageRecord::new(end - TimeDelta::minutes(5), end));
    }
    for d in old.iter().chain(&ancient) {
        let end = now - TimeDelta::days(*d);
        log.add_outage(OutageRecord::new(end - TimeDelta::minutes(5), end));
    }

    assert_eq!(log.count(), recent.len() + old.len());
    assert_eq!(log.count_24h(), recent.len());
    assert!(log.iter().all(|r| r.end >= now - TimeDelta::days(30)));
}

#[test]
fn load_sorts_regardless_of_line_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Default.aurlog");
    fs::write(
        &path,
        "2024-01-03T00:00:00Z~2024-01-03T02:00:00Z~terceira\n\
         2024-01-01T00:00:00Z~2024-01-01T01:00:00Z~primeira\n\
         2024-01-02T00:00:00Z~2024-01-02T00:30:00Z\n",
    )
    .unwrap();

    let log = OutageLog::load_from_file_with_clock(&path, TimeDelta::days(30), clock()).unwrap();

    assert_eq!(log.count(), 3);
    let starts: Vec<_> = log.iter().map(|r| r.start).collect();
    assert_eq!(starts, vec![ts(1, 0), ts(2, 0), ts(3, 0)]);
    assert_eq!(log.get_at(0).unwrap().description, "primeira");
    assert_eq!(log.get_at(1).unwrap().description, "");
    assert!(matches!(
        log.get_at(3),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn malformed_line_fails_whole_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Default.aurlog");
    fs::write(
        &path,
        "2024-01-01T00:00:00Z~2024-01-01T01:00:00Z~\n\
         01/02/2024 00:00:00~2024-01-02T01:00:00Z~\n\
         2024-01-03T00:00:00Z~2024-01-03T01:00:00Z~\n",
    )
    .unwrap();

    let err = OutageLog::load_from_file_with_clock(&path, TimeDelta::days(30), clock()).unwrap_err();

    match err {
        Error::Parse { line, source } => {
            assert_eq!(line, 2);
            assert!(matches!(source, ParseError::Timestamp { field: "start", .. }));
        }
        other => panic!("erro inesperado: {other:?}"),
    }
}

#[test]
fn save_then_reload_preserves_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Default.aurlog");

    let mut log = OutageLog::with_clock(TimeDelta::days(30), clock());
    log.add_outage(OutageRecord::new(ts(5, 3), ts(5, 4)).with_description("manutenção"));
    log.add_outage(OutageRecord::new(ts(4, 0), ts(4, 2)));
    log.add_outage(
        OutageRecord::new(ts(6, 0), ts(6, 0) + TimeDelta::milliseconds(1500))
            .with_description("queda curta"),
    );
    log.save_to_file(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.starts_with("2024-01-04T00:00:00Z~2024-01-04T02:00:00Z~\n"));

    let reloaded = OutageLog::load_from_file_with_clock(&path, TimeDelta::days(30), clock()).unwrap();
    assert_eq!(reloaded.records(), log.records());
    assert_eq!(reloaded.max_outage_duration(), log.max_outage_duration());

    let second = log.get_at(1).unwrap();
    assert_eq!(reloaded.index_of(second), Some(1));
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Default.aurlog");
    fs::write(&path, "conteúdo antigo\nmais uma linha\ne outra\n").unwrap();

    let mut log = OutageLog::with_clock(TimeDelta::days(30), clock());
    log.add_outage(OutageRecord::new(ts(1, 0), ts(1, 1)));
    log.save_to_file(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "2024-01-01T00:00:00Z~2024-01-01T01:00:00Z~\n"
    );
}
