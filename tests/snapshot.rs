//! End-to-end: fixture export → decode → build → project.

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use jujulens::{
    Baseline, EntityKind, FileSource, Format, Report, Section, Snapshot, SnapshotError,
    SnapshotSource, Tier,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/status.yaml")
}

fn fixture() -> Snapshot {
    let mut source = FileSource::new(fixture_path());
    let document = source.load().unwrap();
    Snapshot::build(&document).unwrap()
}

fn row<'a>(rows: &'a [jujulens::Row], name: &str) -> &'a jujulens::Row {
    rows.iter()
        .find(|row| row[0].text.trim_start() == name)
        .unwrap_or_else(|| panic!("no row named {name}"))
}

#[test]
fn test_model_version_and_meter() {
    let snapshot = fixture();
    let rows = Section::Model.rows(&snapshot, &Baseline::default(), true);
    let model = &rows[0];

    assert_eq!(model[0].text, "default");
    assert_eq!(model[1].text, "prod-ctl");
    assert_eq!(model[2].text, "aws/eu-west-1");
    assert_eq!(model[3].text, "2.3.0");
    assert_eq!(model[3].tier, Some(Tier::Degraded));
    assert_eq!(model[6].tier, Some(Tier::Nominal));
    assert_eq!(model[7].text, "amber");
    assert_eq!(model[7].tier, Some(Tier::Degraded));
    assert_eq!(model[8].text, "approaching limit");
    assert_eq!(model[9].text, "upgrade available: 2.5.1");
}

#[test]
fn test_seeded_timestamp() {
    let snapshot = fixture();
    let authority = snapshot.timestamp();

    assert!(authority.is_seeded());
    assert_eq!(
        authority.canonical(),
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 5, 12).unwrap()
    );

    let rows = Section::Model.rows(&snapshot, &Baseline::default(), false);
    assert_eq!(rows[0][5].text, "09:05:12Z");
    assert!(!rows[0][9].text.contains("Guessing"));
}

#[test]
fn test_application_rows() {
    let snapshot = fixture();
    let rows = Section::Applications.rows(&snapshot, &Baseline::default(), true);

    let mysql = row(&rows, "mysql");
    assert_eq!(mysql[3].text, "2");
    assert_eq!(mysql[5].tier, Some(Tier::Nominal));
    assert_eq!(mysql[6].text, "3");
    assert_eq!(mysql[6].tier, Some(Tier::Degraded));
    assert_eq!(mysql[9].text, "exposed");

    let telegraf = row(&rows, "telegraf");
    assert_eq!(telegraf[2].tier, None, "waiting stays undecorated");
    assert_eq!(telegraf[3].text, "1");
    assert_eq!(telegraf[5].text, "local");
    assert_eq!(telegraf[5].tier, Some(Tier::Degraded));
    assert_eq!(telegraf[6].tier, Some(Tier::Nominal));
}

#[test]
fn test_unit_rows() {
    let snapshot = fixture();
    let rows = Section::Units.rows(&snapshot, &Baseline::default(), true);
    let names: Vec<&str> = rows.iter().map(|row| row[0].text.as_str()).collect();
    assert_eq!(names, vec!["mysql/0*", "  telegraf/0", "mysql/1"]);

    let leader = &rows[0];
    assert_eq!(leader[1].tier, Some(Tier::Nominal));
    assert_eq!(leader[2].tier, Some(Tier::Nominal));
    assert_eq!(leader[3].text, "0");
    assert_eq!(leader[5].text, "3306/tcp");

    let subordinate = &rows[1];
    assert_eq!(subordinate[1].tier, None);
    assert_eq!(subordinate[3].text, "0");

    let blocked = &rows[2];
    assert_eq!(blocked[1].tier, Some(Tier::Critical));
    assert_eq!(blocked[6].text, "missing relation");
    assert_eq!(blocked[7].text, "machine 7 missing");
}

#[test]
fn test_machine_and_interface_rows() {
    let snapshot = fixture();
    let baseline = Baseline::default();

    let machines = Section::Machines.rows(&snapshot, &baseline, true);
    assert_eq!(machines.len(), 2);
    let host = &machines[0];
    assert_eq!(host[0].text, "0");
    assert_eq!(host[1].tier, Some(Tier::Nominal));
    assert_eq!(host[6].text, "eu-west-1a");
    assert_eq!(host[7].text, "2");
    assert_eq!(host[8].text, "4096M");

    let container = &machines[1];
    assert_eq!(container[0].text, "0/lxd/0");
    assert!(container[6..10].iter().all(|cell| cell.text.is_empty()));
    assert_eq!(container[10].text, "Container started");
    assert_eq!(container[10].tier, Some(Tier::Nominal));

    let interfaces = Section::Interfaces.rows(&snapshot, &baseline, true);
    assert_eq!(interfaces.len(), 1);
    let eth0 = &interfaces[0];
    assert_eq!(eth0[0].text, "0");
    assert_eq!(eth0[2].text, "10.0.0.4,10.0.0.5");
    assert_eq!(eth0[6].text, "true");
    assert_eq!(eth0[6].tier, Some(Tier::Nominal));
}

#[test]
fn test_undecorated_projection_has_no_tiers() {
    let snapshot = fixture();
    for section in Section::ALL {
        for row in section.rows(&snapshot, &Baseline::default(), false) {
            assert_eq!(row.len(), section.columns().len());
            assert!(row.iter().all(|cell| cell.tier.is_none()));
        }
    }
}

#[test]
fn test_report_summary() {
    let snapshot = fixture();
    let report = Report::build(&snapshot, &Baseline::default());

    assert!(!report.timestamp_guessed);
    assert_eq!(report.summary.worst(), Some(Tier::Critical));
    assert_eq!(report.records("Units").len(), 3);
}

#[test]
fn test_missing_model_status_aborts() {
    let text = std::fs::read_to_string(fixture_path())
        .unwrap()
        .replace("  model-status:\n", "  other-status:\n");
    let err = Snapshot::parse(&text, Format::Yaml).unwrap_err();

    assert!(matches!(err, SnapshotError::Schema { .. }));
    assert_eq!(err.kind(), Some(EntityKind::Model));
}

#[test]
fn test_bad_timestamp_aborts() {
    let text = std::fs::read_to_string(fixture_path())
        .unwrap()
        .replace("since: 15 Mar 2024 08:44:30Z", "since: yesterday");
    let err = Snapshot::parse(&text, Format::Yaml).unwrap_err();

    assert!(matches!(err, SnapshotError::TemporalParse { .. }));
    assert_eq!(err.kind(), Some(EntityKind::Container));
}
