//! The model: root of the entity graph.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jujulens_types::{ModelRecord, Payload, PlatformVersion};
use tracing::{debug, warn};

use super::application::Application;
use super::interface::NetworkInterface;
use super::machine::{BasicMachine, MachineRole};
use super::timestamp::TimestampAuthority;
use super::unit::{application_of, BasicUnit};
use super::{decode, merge_since};
use crate::error::{EntityKind, SnapshotError};

/// Meter status of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterStatus {
    pub color: String,
    pub message: String,
}

/// A model, owning its applications and machines.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub model_type: String,
    pub controller: String,
    pub cloud: String,
    pub region: Option<String>,
    pub version: PlatformVersion,
    /// The version exactly as reported.
    pub version_text: String,
    pub sla: String,
    pub status: String,
    pub since: DateTime<Utc>,
    pub meter: Option<MeterStatus>,
    pub upgrade_available: Option<String>,
    pub applications: BTreeMap<String, Application>,
    pub machines: BTreeMap<String, BasicMachine>,
    pub notes: Vec<String>,
}

impl Model {
    /// Build the model: scalar fields first, then applications, then
    /// machines (with their containers and interfaces).
    pub fn build(
        payload: &Payload,
        applications: &BTreeMap<String, Payload>,
        machines: &BTreeMap<String, Payload>,
        authority: &mut TimestampAuthority,
    ) -> Result<Self, SnapshotError> {
        let kind = EntityKind::Model;
        let label = payload
            .get("name")
            .and_then(|name| name.as_str())
            .unwrap_or("?")
            .to_string();
        let record: ModelRecord = decode(kind, &label, payload)?;
        let name = record.name;

        let version: PlatformVersion =
            record
                .version
                .parse()
                .map_err(|source| SnapshotError::VersionParse {
                    kind,
                    name: name.clone(),
                    value: record.version.clone(),
                    source,
                })?;

        let since = merge_since(authority, kind, &name, &record.model_status.since)?;

        let mut notes = Vec::new();
        if let Some(upgrade) = &record.upgrade_available {
            notes.push(format!("upgrade available: {}", upgrade));
        }

        let mut built_applications = BTreeMap::new();
        for (app_name, app_payload) in applications {
            let app = Application::build(app_name, app_payload, &name, authority)?;
            built_applications.insert(app_name.clone(), app);
        }

        let mut built_machines = BTreeMap::new();
        for (machine_name, machine_payload) in machines {
            let machine =
                BasicMachine::build(machine_name, machine_payload, MachineRole::Host, authority)?;
            built_machines.insert(machine_name.clone(), machine);
        }

        let mut model = Self {
            name,
            model_type: record.model_type,
            controller: record.controller,
            cloud: record.cloud,
            region: record.region,
            version,
            version_text: record.version,
            sla: record.sla,
            status: record.model_status.current,
            since,
            meter: record.meter_status.map(|meter| MeterStatus {
                color: meter.color,
                message: meter.message.unwrap_or_default(),
            }),
            upgrade_available: record.upgrade_available,
            applications: built_applications,
            machines: built_machines,
            notes,
        };
        model.resolve_placements();

        debug!(
            model = %model.name,
            applications = model.applications.len(),
            machines = model.machines.len(),
            "built model"
        );
        Ok(model)
    }

    /// Note every principal unit whose placement names no known machine.
    fn resolve_placements(&mut self) {
        let mut missing = Vec::new();
        for app in self.applications.values() {
            for unit in app.units.values() {
                if let Some(machine) = &unit.machine {
                    if self.machine(machine).is_none() {
                        missing.push((app.name.clone(), unit.name.clone(), machine.clone()));
                    }
                }
            }
        }

        for (app_name, unit_name, machine) in missing {
            warn!(unit = %unit_name, machine = %machine, "unit placed on unknown machine");
            if let Some(unit) = self
                .applications
                .get_mut(&app_name)
                .and_then(|app| app.units.get_mut(&unit_name))
            {
                unit.add_note(format!("machine {} missing", machine));
            }
        }
    }

    pub fn application(&self, name: &str) -> Option<&Application> {
        self.applications.get(name)
    }

    /// Find a machine or container by name anywhere in the model.
    pub fn machine(&self, name: &str) -> Option<&BasicMachine> {
        if let Some(machine) = self.machines.get(name) {
            return Some(machine);
        }
        self.machines.values().find_map(|machine| machine.find(name))
    }

    /// `cloud/region`, or just the cloud when no region is reported.
    pub fn cloud_region(&self) -> String {
        match &self.region {
            Some(region) => format!("{}/{}", self.cloud, region),
            None => self.cloud.clone(),
        }
    }

    /// Every principal unit, each followed by its subordinates.
    pub fn units(&self) -> Vec<&BasicUnit> {
        fn push<'a>(unit: &'a BasicUnit, out: &mut Vec<&'a BasicUnit>) {
            out.push(unit);
            for sub in unit.subordinates.values() {
                push(sub, out);
            }
        }

        let mut out = Vec::new();
        for app in self.applications.values() {
            for unit in app.units.values() {
                push(unit, &mut out);
            }
        }
        out
    }

    /// Every machine, each followed by its containers.
    pub fn all_machines(&self) -> Vec<&BasicMachine> {
        let mut out = Vec::new();
        for machine in self.machines.values() {
            machine.flatten(&mut out);
        }
        out
    }

    /// Every network interface of every machine and container.
    pub fn interfaces(&self) -> Vec<&NetworkInterface> {
        self.all_machines()
            .into_iter()
            .flat_map(|machine| machine.interfaces.values())
            .collect()
    }

    /// Number of units of an application.
    ///
    /// A subordinate application has no units of its own; its scale is the
    /// number of its subordinates riding on the principals it is attached
    /// to. Principals that cannot be found contribute nothing.
    pub fn scale(&self, app: &Application) -> usize {
        if !app.is_subordinate() {
            return app.units.len();
        }

        app.subordinate_to
            .iter()
            .map(|principal| match self.application(principal) {
                Some(principal) => principal
                    .units
                    .values()
                    .flat_map(|unit| unit.subordinates.keys())
                    .filter(|sub| application_of(sub) == app.name)
                    .count(),
                None => {
                    debug!(application = %app.name, principal = %principal, "principal not found");
                    0
                }
            })
            .sum()
    }
}
