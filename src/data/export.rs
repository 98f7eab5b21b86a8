//! JSON export of the projected tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::classify::Tier;
use super::rows::{Baseline, Row, Section};
use super::snapshot::Snapshot;

/// One projected table.
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Row>,
}

/// Counts of decorated cells per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub nominal: usize,
    pub informational: usize,
    pub degraded: usize,
    pub critical: usize,
}

impl TierSummary {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Nominal => self.nominal += 1,
            Tier::Informational => self.informational += 1,
            Tier::Degraded => self.degraded += 1,
            Tier::Critical => self.critical += 1,
        }
    }

    /// The most severe tier seen, if any cell was decorated.
    pub fn worst(&self) -> Option<Tier> {
        [
            (Tier::Critical, self.critical),
            (Tier::Degraded, self.degraded),
            (Tier::Informational, self.informational),
            (Tier::Nominal, self.nominal),
        ]
        .into_iter()
        .find(|(_, count)| *count > 0)
        .map(|(tier, _)| tier)
    }
}

/// Everything written by `--export`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub model: String,
    pub timestamp: String,
    pub timestamp_guessed: bool,
    pub summary: TierSummary,
    pub sections: Vec<SectionReport>,
}

impl Report {
    /// Project every section with decoration on and tally the tiers.
    pub fn build(snapshot: &Snapshot, baseline: &Baseline) -> Self {
        let mut summary = TierSummary::default();
        let sections: Vec<SectionReport> = Section::ALL
            .iter()
            .map(|section| {
                let rows = section.rows(snapshot, baseline, true);
                for tier in rows.iter().flatten().flat_map(|cell| cell.tiers()) {
                    summary.record(tier);
                }
                SectionReport {
                    name: section.label(),
                    columns: section.columns(),
                    rows,
                }
            })
            .collect();

        let authority = snapshot.timestamp();
        Self {
            model: snapshot.model.name.clone(),
            timestamp: authority.canonical().to_rfc3339(),
            timestamp_guessed: !authority.is_seeded(),
            summary,
            sections,
        }
    }

    /// Rows of one section keyed by column name, for consumers that prefer records.
    pub fn records(&self, name: &str) -> Vec<BTreeMap<&'static str, &str>> {
        self.sections
            .iter()
            .filter(|section| section.name == name)
            .flat_map(|section| {
                section.rows.iter().map(|row| {
                    section
                        .columns
                        .iter()
                        .copied()
                        .zip(row.iter().map(|cell| cell.text.as_str()))
                        .collect::<BTreeMap<_, _>>()
                })
            })
            .collect()
    }

    /// Write the report as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Write error: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::snapshot::Format;

    const STATUS: &str = r#"
model:
  name: default
  type: iaas
  controller: ctl
  cloud: aws
  version: 2.3.0
  sla: unsupported
  model-status: {current: available, since: "01 Jan 2020 10:00:00Z"}
machines: {}
applications:
  app:
    charm: cs:app-3
    series: bionic
    os: ubuntu
    charm-origin: jujucharms
    charm-name: app
    charm-rev: 3
    exposed: false
    application-status: {current: active, since: "01 Jan 2020 10:00:00Z"}
    units:
      app/0:
        workload-status: {current: active, since: "01 Jan 2020 10:00:00Z"}
        juju-status: {current: idle, since: "01 Jan 2020 10:00:00Z", version: 2.3.0}
        public-address: 10.0.0.1
"#;

    #[test]
    fn test_report_counts_tiers() {
        let snapshot = Snapshot::parse(STATUS, Format::Yaml).unwrap();
        let report = Report::build(&snapshot, &Baseline::default());

        assert_eq!(report.model, "default");
        assert!(report.timestamp_guessed);
        assert_eq!(report.sections.len(), Section::ALL.len());
        assert!(report.summary.degraded >= 1);
        assert!(report.summary.nominal >= 1);
        assert_eq!(report.summary.critical, 0);
        assert_eq!(report.summary.worst(), Some(Tier::Degraded));
    }

    #[test]
    fn test_records_by_column() {
        let snapshot = Snapshot::parse(STATUS, Format::Yaml).unwrap();
        let report = Report::build(&snapshot, &Baseline::default());

        let units = report.records("Units");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0]["Unit"], "app/0");
        assert_eq!(units[0]["Workload"], "active");
        assert!(report.records("Nope").is_empty());
    }

    #[test]
    fn test_report_write() {
        let snapshot = Snapshot::parse(STATUS, Format::Yaml).unwrap();
        let report = Report::build(&snapshot, &Baseline::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        report.write(&path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["sections"][0]["name"], "Model");
        assert_eq!(value["summary"]["critical"], 0);
    }

    #[test]
    fn test_worst_of_empty_summary() {
        assert_eq!(TierSummary::default().worst(), None);
    }
}
