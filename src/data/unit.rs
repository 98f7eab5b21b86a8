//! Units and subordinates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jujulens_types::{Payload, UnitRecord};
use tracing::debug;

use super::timestamp::TimestampAuthority;
use super::{decode, merge_since};
use crate::error::{EntityKind, SnapshotError};

/// Whether a unit belongs to an application directly or rides on another
/// unit as a subordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRole {
    Principal,
    Subordinate,
}

impl UnitRole {
    fn kind(self) -> EntityKind {
        match self {
            UnitRole::Principal => EntityKind::Unit,
            UnitRole::Subordinate => EntityKind::Subordinate,
        }
    }
}

/// A unit or subordinate.
#[derive(Debug, Clone)]
pub struct BasicUnit {
    pub name: String,
    pub role: UnitRole,
    /// Owning application (principals) or owning unit (subordinates).
    pub owner: String,
    pub workload_status: String,
    pub workload_message: String,
    pub workload_since: DateTime<Utc>,
    pub agent_status: String,
    pub agent_since: DateTime<Utc>,
    pub agent_version: String,
    pub public_address: String,
    pub open_ports: Vec<String>,
    pub leader: bool,
    /// Placement. Subordinates inherit their principal's.
    pub machine: Option<String>,
    pub subordinates: BTreeMap<String, BasicUnit>,
    pub notes: Vec<String>,
}

impl BasicUnit {
    /// Build a unit and, recursively, its subordinates.
    pub fn build(
        name: &str,
        payload: &Payload,
        role: UnitRole,
        owner: &str,
        inherited_machine: Option<&str>,
        authority: &mut TimestampAuthority,
    ) -> Result<Self, SnapshotError> {
        let kind = role.kind();
        let record: UnitRecord = decode(kind, name, payload)?;

        let agent_version = record.juju_status.version.clone().ok_or_else(|| {
            SnapshotError::schema(kind, name, "missing field `version` in `juju-status`")
        })?;

        let workload_since = merge_since(authority, kind, name, &record.workload_status.since)?;
        let agent_since = merge_since(authority, kind, name, &record.juju_status.since)?;

        let machine = record.machine.or_else(|| inherited_machine.map(str::to_string));

        let mut subordinates = BTreeMap::new();
        for (sub_name, sub_payload) in &record.subordinates {
            let sub = BasicUnit::build(
                sub_name,
                sub_payload,
                UnitRole::Subordinate,
                name,
                machine.as_deref(),
                authority,
            )?;
            subordinates.insert(sub_name.clone(), sub);
        }

        debug!(%kind, unit = name, subordinates = subordinates.len(), "built unit");

        Ok(Self {
            name: name.to_string(),
            role,
            owner: owner.to_string(),
            workload_status: record.workload_status.current,
            workload_message: record.workload_status.message.unwrap_or_default(),
            workload_since,
            agent_status: record.juju_status.current,
            agent_since,
            agent_version,
            public_address: record.public_address,
            open_ports: record.open_ports,
            leader: record.leader,
            machine,
            subordinates,
            notes: Vec::new(),
        })
    }

    /// The application this unit is an instance of (`mysql/0` -> `mysql`).
    pub fn application_name(&self) -> &str {
        application_of(&self.name)
    }

    pub fn subordinate(&self, name: &str) -> Option<&BasicUnit> {
        self.subordinates.get(name)
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

/// The application part of a unit name.
pub fn application_of(unit_name: &str) -> &str {
    unit_name.split_once('/').map_or(unit_name, |(app, _)| app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit_payload() -> Payload {
        json!({
            "workload-status": {"current": "active", "since": "15 Mar 2024 09:00:00Z", "message": "ready"},
            "juju-status": {"current": "idle", "since": "15 Mar 2024 09:05:00Z", "version": "2.5.1"},
            "public-address": "10.0.0.4",
            "open-ports": ["3306/tcp"],
            "leader": true,
            "machine": "0",
            "subordinates": {
                "telegraf/0": {
                    "workload-status": {"current": "active", "since": "15 Mar 2024 09:10:00Z"},
                    "juju-status": {"current": "idle", "since": "15 Mar 2024 09:10:00Z", "version": "2.5.1"},
                    "public-address": "10.0.0.4"
                }
            }
        })
    }

    #[test]
    fn test_build_unit_with_subordinate() {
        let mut authority = TimestampAuthority::new();
        let unit = BasicUnit::build(
            "mysql/0",
            &unit_payload(),
            UnitRole::Principal,
            "mysql",
            None,
            &mut authority,
        )
        .unwrap();

        assert_eq!(unit.workload_status, "active");
        assert_eq!(unit.workload_message, "ready");
        assert_eq!(unit.agent_version, "2.5.1");
        assert!(unit.leader);
        assert_eq!(unit.application_name(), "mysql");

        let sub = unit.subordinate("telegraf/0").unwrap();
        assert_eq!(sub.role, UnitRole::Subordinate);
        assert_eq!(sub.owner, "mysql/0");
        assert_eq!(sub.machine.as_deref(), Some("0"));
        assert!(!sub.leader);

        // The subordinate's since is the latest merged.
        assert_eq!(authority.canonical(), sub.workload_since);
    }

    #[test]
    fn test_missing_agent_version_is_schema_error() {
        let mut payload = unit_payload();
        payload["juju-status"]
            .as_object_mut()
            .unwrap()
            .remove("version");
        let mut authority = TimestampAuthority::new();
        let err = BasicUnit::build("mysql/0", &payload, UnitRole::Principal, "mysql", None, &mut authority)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Schema { kind: EntityKind::Unit, .. }));
    }

    #[test]
    fn test_bad_subordinate_fails_the_parent() {
        let mut payload = unit_payload();
        payload["subordinates"]["telegraf/0"]["workload-status"]["since"] = json!("yesterday");
        let mut authority = TimestampAuthority::new();
        let err = BasicUnit::build("mysql/0", &payload, UnitRole::Principal, "mysql", None, &mut authority)
            .unwrap_err();
        match err {
            SnapshotError::TemporalParse { kind, name, .. } => {
                assert_eq!(kind, EntityKind::Subordinate);
                assert_eq!(name, "telegraf/0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_application_of() {
        assert_eq!(application_of("mysql/0"), "mysql");
        assert_eq!(application_of("odd"), "odd");
    }
}
