//! Network interfaces attached to machines and containers.

use jujulens_types::{InterfaceRecord, Payload};
use tracing::debug;

use super::decode;
use crate::error::{EntityKind, SnapshotError};

/// A network interface of a machine or container.
#[derive(Debug, Clone)]
pub struct NetworkInterface {
    /// Name of the machine or container the interface belongs to.
    pub host: String,
    pub name: String,
    pub ip_addresses: Vec<String>,
    pub mac_address: String,
    pub is_up: bool,
    pub gateway: Option<String>,
    pub space: Option<String>,
    pub notes: Vec<String>,
}

impl NetworkInterface {
    pub fn build(name: &str, payload: &Payload, host: &str) -> Result<Self, SnapshotError> {
        let record: InterfaceRecord = decode(EntityKind::NetworkInterface, name, payload)?;
        debug!(host, interface = name, "built network interface");
        Ok(Self {
            host: host.to_string(),
            name: name.to_string(),
            ip_addresses: record.ip_addresses,
            mac_address: record.mac_address,
            is_up: record.is_up,
            gateway: record.gateway,
            space: record.space,
            notes: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_interface() {
        let payload = json!({
            "ip-addresses": ["10.0.0.4", "fe80::1"],
            "mac-address": "00:16:3e:aa:bb:cc",
            "is-up": true,
            "gateway": "10.0.0.1"
        });
        let iface = NetworkInterface::build("eth0", &payload, "0").unwrap();
        assert_eq!(iface.host, "0");
        assert_eq!(iface.ip_addresses.len(), 2);
        assert_eq!(iface.gateway.as_deref(), Some("10.0.0.1"));
        assert!(iface.space.is_none());
    }

    #[test]
    fn test_missing_mac_is_schema_error() {
        let payload = json!({"ip-addresses": [], "is-up": false});
        let err = NetworkInterface::build("eth0", &payload, "0").unwrap_err();
        assert!(err.to_string().contains("mac-address"));
    }
}
