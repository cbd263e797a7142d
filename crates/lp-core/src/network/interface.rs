use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

/// One address assigned to a local interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub address: IpAddr,
    /// Only IPv4 entries carry a netmask.
    pub netmask: Option<Ipv4Addr>,
}

impl AddressEntry {
    pub fn ipv4(address: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            address: IpAddr::V4(address),
            netmask: Some(netmask),
        }
    }

    /// Netmask as a 32-bit integer; zero when absent.
    pub fn netmask_bits(&self) -> u32 {
        self.netmask.map(u32::from).unwrap_or(0)
    }
}

/// Snapshot of an active local interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    pub entries: Vec<AddressEntry>,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>, entries: Vec<AddressEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}
