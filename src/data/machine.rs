//! Machines and the containers nested inside them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jujulens_types::{MachineRecord, Payload};
use tracing::debug;

use super::interface::NetworkInterface;
use super::timestamp::TimestampAuthority;
use super::{decode, merge_since};
use crate::error::{EntityKind, SnapshotError};

/// Whether a machine is a top-level host or a container on another machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineRole {
    Host,
    Container { host: String },
}

impl MachineRole {
    fn kind(&self) -> EntityKind {
        match self {
            MachineRole::Host => EntityKind::Machine,
            MachineRole::Container { .. } => EntityKind::Container,
        }
    }
}

/// Hardware characteristics reported as `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hardware {
    pub arch: Option<String>,
    pub cores: Option<String>,
    pub mem: Option<String>,
    pub root_disk: Option<String>,
    pub availability_zone: Option<String>,
}

impl Hardware {
    /// Parse a hardware string such as `arch=amd64 cores=2 mem=4096M`.
    /// Unknown keys and malformed tokens are ignored.
    pub fn parse(s: &str) -> Self {
        let mut hardware = Hardware::default();
        for (key, value) in s.split_whitespace().filter_map(|token| token.split_once('=')) {
            let value = Some(value.to_string());
            match key {
                "arch" => hardware.arch = value,
                "cores" => hardware.cores = value,
                "mem" => hardware.mem = value,
                "root-disk" => hardware.root_disk = value,
                "availability-zone" => hardware.availability_zone = value,
                _ => {}
            }
        }
        hardware
    }
}

/// A machine or container.
#[derive(Debug, Clone)]
pub struct BasicMachine {
    pub name: String,
    pub role: MachineRole,
    pub agent_status: String,
    pub agent_since: DateTime<Utc>,
    pub provisioning_status: String,
    pub provisioning_message: String,
    pub provisioning_since: DateTime<Utc>,
    pub dns_name: String,
    pub instance_id: String,
    pub series: String,
    pub hardware: Hardware,
    pub containers: BTreeMap<String, BasicMachine>,
    pub interfaces: BTreeMap<String, NetworkInterface>,
    pub notes: Vec<String>,
}

impl BasicMachine {
    /// Build a machine, its containers (recursively) and its interfaces.
    pub fn build(
        name: &str,
        payload: &Payload,
        role: MachineRole,
        authority: &mut TimestampAuthority,
    ) -> Result<Self, SnapshotError> {
        let kind = role.kind();
        let record: MachineRecord = decode(kind, name, payload)?;

        let agent_since = merge_since(authority, kind, name, &record.juju_status.since)?;
        let provisioning_since = merge_since(authority, kind, name, &record.machine_status.since)?;

        let mut containers = BTreeMap::new();
        for (container_name, container_payload) in &record.containers {
            let container = BasicMachine::build(
                container_name,
                container_payload,
                MachineRole::Container {
                    host: name.to_string(),
                },
                authority,
            )?;
            containers.insert(container_name.clone(), container);
        }

        let mut interfaces = BTreeMap::new();
        for (iface_name, iface_payload) in &record.network_interfaces {
            let iface = NetworkInterface::build(iface_name, iface_payload, name)?;
            interfaces.insert(iface_name.clone(), iface);
        }

        debug!(
            %kind,
            machine = name,
            containers = containers.len(),
            interfaces = interfaces.len(),
            "built machine"
        );

        Ok(Self {
            name: name.to_string(),
            role,
            agent_status: record.juju_status.current,
            agent_since,
            provisioning_status: record.machine_status.current,
            provisioning_message: record.machine_status.message.unwrap_or_default(),
            provisioning_since,
            dns_name: record.dns_name,
            instance_id: record.instance_id,
            series: record.series,
            hardware: record.hardware.as_deref().map(Hardware::parse).unwrap_or_default(),
            containers,
            interfaces,
            notes: Vec::new(),
        })
    }

    pub fn is_container(&self) -> bool {
        matches!(self.role, MachineRole::Container { .. })
    }

    /// The machine this container lives on.
    pub fn host(&self) -> Option<&str> {
        match &self.role {
            MachineRole::Host => None,
            MachineRole::Container { host } => Some(host.as_str()),
        }
    }

    /// Find this machine or one of its nested containers by name.
    pub fn find(&self, name: &str) -> Option<&BasicMachine> {
        if self.name == name {
            return Some(self);
        }
        self.containers.values().find_map(|container| container.find(name))
    }

    /// This machine followed by its containers, depth first.
    pub fn flatten<'a>(&'a self, out: &mut Vec<&'a BasicMachine>) {
        out.push(self);
        for container in self.containers.values() {
            container.flatten(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn machine_payload() -> Payload {
        json!({
            "juju-status": {"current": "started", "since": "15 Mar 2024 08:00:00Z"},
            "machine-status": {"current": "running", "since": "15 Mar 2024 08:01:00Z", "message": "Deployed"},
            "dns-name": "10.0.0.4",
            "instance-id": "i-0abc",
            "series": "bionic",
            "hardware": "arch=amd64 cores=2 mem=4096M root-disk=8192M availability-zone=us-east-1a",
            "network-interfaces": {
                "eth0": {"ip-addresses": ["10.0.0.4"], "mac-address": "00:16:3e:aa:bb:cc", "is-up": true}
            },
            "containers": {
                "0/lxd/0": {
                    "juju-status": {"current": "started", "since": "15 Mar 2024 08:30:00Z"},
                    "machine-status": {"current": "running", "since": "15 Mar 2024 08:31:00Z", "message": "Container started"},
                    "dns-name": "10.0.3.10",
                    "instance-id": "juju-abc-0-lxd-0",
                    "series": "bionic"
                }
            }
        })
    }

    #[test]
    fn test_build_machine_with_container() {
        let mut authority = TimestampAuthority::new();
        let machine =
            BasicMachine::build("0", &machine_payload(), MachineRole::Host, &mut authority).unwrap();

        assert!(!machine.is_container());
        assert_eq!(machine.hardware.cores.as_deref(), Some("2"));
        assert_eq!(machine.hardware.availability_zone.as_deref(), Some("us-east-1a"));
        assert_eq!(machine.interfaces["eth0"].host, "0");

        let container = machine.find("0/lxd/0").unwrap();
        assert!(container.is_container());
        assert_eq!(container.host(), Some("0"));
        assert_eq!(container.provisioning_message, "Container started");
        assert_eq!(container.hardware, Hardware::default());

        assert_eq!(authority.canonical(), container.provisioning_since);
    }

    #[test]
    fn test_flatten_and_find() {
        let mut authority = TimestampAuthority::new();
        let machine =
            BasicMachine::build("0", &machine_payload(), MachineRole::Host, &mut authority).unwrap();
        let mut all = Vec::new();
        machine.flatten(&mut all);
        let names: Vec<&str> = all.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["0", "0/lxd/0"]);
        assert!(machine.find("1").is_none());
    }

    #[test]
    fn test_bad_container_fails_the_host() {
        let mut payload = machine_payload();
        payload["containers"]["0/lxd/0"]
            .as_object_mut()
            .unwrap()
            .remove("instance-id");
        let mut authority = TimestampAuthority::new();
        let err = BasicMachine::build("0", &payload, MachineRole::Host, &mut authority).unwrap_err();
        match err {
            SnapshotError::Schema { kind, name, .. } => {
                assert_eq!(kind, EntityKind::Container);
                assert_eq!(name, "0/lxd/0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_hardware_parse_ignores_noise() {
        let hw = Hardware::parse("arch=arm64 tags=a,b junk cores=4");
        assert_eq!(hw.arch.as_deref(), Some("arm64"));
        assert_eq!(hw.cores.as_deref(), Some("4"));
        assert!(hw.mem.is_none());
    }
}
