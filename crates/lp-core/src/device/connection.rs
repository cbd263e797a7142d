use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::value_objects::{AdapterName, DeviceId};
use crate::network::inet4_address;

/// One observation of reaching a device at an address through a local adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConnection {
    pub host_address: IpAddr,
    pub adapter_name: AdapterName,
    pub device_id: DeviceId,
    /// Unix milliseconds of the observation.
    pub last_checked_date: i64,
}

impl DeviceConnection {
    /// A connection that has only its address filled in, awaiting reconciliation.
    pub fn new(host_address: IpAddr) -> Self {
        Self {
            host_address,
            adapter_name: AdapterName::unknown(),
            device_id: DeviceId::default(),
            last_checked_date: 0,
        }
    }

    /// The string form used for the stored `ip_address` column.
    pub fn ip_address(&self) -> String {
        match self.host_address {
            IpAddr::V4(v4) => inet4_address(u32::from(v4), false),
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => inet4_address(u32::from(v4), false),
                None => v6.to_string(),
            },
        }
    }
}
