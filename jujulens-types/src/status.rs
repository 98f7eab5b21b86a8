//! Raw entity records of a status export.
//!
//! Field names follow the kebab-case keys `juju status` emits. Optional keys
//! are `Option` or carry `#[serde(default)]`; everything else is required
//! and a missing key fails decoding of that entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An undecoded entity record, decoded later by the entity graph builder.
pub type Payload = serde_json::Value;

/// The top level of a status export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatusDocument {
    /// The model record; required.
    pub model: Payload,

    /// Top-level machines, keyed by machine id.
    #[serde(default)]
    pub machines: BTreeMap<String, Payload>,

    /// Applications, keyed by application name.
    #[serde(default)]
    pub applications: BTreeMap<String, Payload>,

    /// Present when the export was taken through a controller that
    /// reports its wall clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerInfo>,
}

/// Controller block. Only the clock time is reported, without a date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControllerInfo {
    /// Clock-only timestamp, e.g. `"09:00:00Z"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A `{current, since, message?, version?}` status block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub current: String,
    pub since: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Meter status of a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterInfo {
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The `model` record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub model_type: String,
    pub controller: String,
    pub cloud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub version: String,
    pub sla: String,
    pub model_status: StatusInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_status: Option<MeterInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_available: Option<String>,
}

/// A charm revision, which exports carry either as a number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Revision {
    Number(u64),
    Text(String),
}

impl Revision {
    /// The revision as a number, if it is one.
    pub fn value(&self) -> Option<u32> {
        match self {
            Revision::Number(n) => u32::try_from(*n).ok(),
            Revision::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// An entry of the `applications` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationRecord {
    pub charm: String,
    pub series: String,
    pub os: String,
    pub charm_origin: String,
    pub charm_name: String,
    pub charm_rev: Revision,
    pub exposed: bool,
    pub application_status: StatusInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Endpoint name to related entries, kept as reported: plain application
    /// names or richer mappings depending on the client version.
    #[serde(default)]
    pub relations: BTreeMap<String, Payload>,
    #[serde(default)]
    pub endpoint_bindings: BTreeMap<String, String>,
    /// Charm URL of a newer revision, ending in that revision number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_upgrade_to: Option<String>,
    #[serde(default)]
    pub subordinate_to: Vec<String>,
    #[serde(default)]
    pub units: BTreeMap<String, Payload>,
}

/// An entry of an application's `units` map, or of a unit's
/// `subordinates` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnitRecord {
    pub workload_status: StatusInfo,
    pub juju_status: StatusInfo,
    pub public_address: String,
    #[serde(default)]
    pub open_ports: Vec<String>,
    #[serde(default)]
    pub leader: bool,
    /// Placement; subordinates omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(default)]
    pub subordinates: BTreeMap<String, Payload>,
}

/// An entry of the `machines` map, or of a machine's `containers` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MachineRecord {
    pub juju_status: StatusInfo,
    pub machine_status: StatusInfo,
    pub dns_name: String,
    pub instance_id: String,
    pub series: String,
    /// Space-separated `key=value` pairs, e.g. `"arch=amd64 cores=2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(default)]
    pub containers: BTreeMap<String, Payload>,
    #[serde(default)]
    pub network_interfaces: BTreeMap<String, Payload>,
}

/// An entry of a machine's `network-interfaces` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InterfaceRecord {
    pub ip_addresses: Vec<String>,
    pub mac_address: String,
    pub is_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}
