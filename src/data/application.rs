//! Applications and their units.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jujulens_types::{ApplicationRecord, Payload};
use tracing::debug;

use super::timestamp::TimestampAuthority;
use super::unit::{BasicUnit, UnitRole};
use super::{decode, merge_since};
use crate::error::{EntityKind, SnapshotError};

/// A deployed application.
#[derive(Debug, Clone)]
pub struct Application {
    pub name: String,
    /// Owning model.
    pub model: String,
    pub charm: String,
    pub charm_name: String,
    pub charm_rev: u32,
    pub charm_origin: String,
    /// Revision named by `can-upgrade-to`, when the store knows a newer one.
    pub latest_rev: Option<u32>,
    pub can_upgrade_to: Option<String>,
    pub os: String,
    pub series: String,
    pub exposed: bool,
    pub status: String,
    pub status_message: String,
    pub since: DateTime<Utc>,
    /// Workload version.
    pub version: String,
    pub relations: BTreeMap<String, Payload>,
    pub endpoint_bindings: BTreeMap<String, String>,
    /// Principals this application is subordinate to.
    pub subordinate_to: Vec<String>,
    pub units: BTreeMap<String, BasicUnit>,
    pub notes: Vec<String>,
}

impl Application {
    pub fn build(
        name: &str,
        payload: &Payload,
        model: &str,
        authority: &mut TimestampAuthority,
    ) -> Result<Self, SnapshotError> {
        let kind = EntityKind::Application;
        let record: ApplicationRecord = decode(kind, name, payload)?;

        let charm_rev = record.charm_rev.value().ok_or_else(|| {
            SnapshotError::schema(kind, name, "`charm-rev` is not a revision number")
        })?;

        let since = merge_since(authority, kind, name, &record.application_status.since)?;

        let latest_rev = match record.can_upgrade_to.as_deref() {
            Some(url) => Some(trailing_revision(url).ok_or_else(|| {
                SnapshotError::schema(
                    kind,
                    name,
                    format!("`can-upgrade-to` {url:?} does not end in a revision"),
                )
            })?),
            None => None,
        };

        let mut notes = Vec::new();
        if record.exposed {
            notes.push("exposed".to_string());
        }

        let mut units = BTreeMap::new();
        for (unit_name, unit_payload) in &record.units {
            let unit = BasicUnit::build(
                unit_name,
                unit_payload,
                UnitRole::Principal,
                name,
                None,
                authority,
            )?;
            units.insert(unit_name.clone(), unit);
        }

        debug!(application = name, units = units.len(), "built application");

        Ok(Self {
            name: name.to_string(),
            model: model.to_string(),
            charm: record.charm,
            charm_name: record.charm_name,
            charm_rev,
            charm_origin: record.charm_origin,
            latest_rev,
            can_upgrade_to: record.can_upgrade_to,
            os: record.os,
            series: record.series,
            exposed: record.exposed,
            status: record.application_status.current,
            status_message: record.application_status.message.unwrap_or_default(),
            since,
            version: record.version.unwrap_or_default(),
            relations: record.relations,
            endpoint_bindings: record.endpoint_bindings,
            subordinate_to: record.subordinate_to,
            units,
            notes,
        })
    }

    pub fn unit(&self, name: &str) -> Option<&BasicUnit> {
        self.units.get(name)
    }

    pub fn is_subordinate(&self) -> bool {
        !self.subordinate_to.is_empty()
    }
}

/// The revision number a charm URL ends in (`cs:mysql-58` -> 58).
///
/// The URL must have a non-numeric prefix.
fn trailing_revision(url: &str) -> Option<u32> {
    let prefix = url.trim_end_matches(|c: char| c.is_ascii_digit());
    if prefix.is_empty() || prefix.len() == url.len() {
        return None;
    }
    url[prefix.len()..].parse().ok()
}
