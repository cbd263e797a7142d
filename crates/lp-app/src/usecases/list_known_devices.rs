use std::sync::Arc;

use lp_core::device::{Device, DeviceConnection};
use lp_core::ports::{ConnectionRepositoryPort, DeviceRepositoryPort};

use super::discover_device::DiscoverDeviceError;

/// A stored peer together with every address it was last seen at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownDevice {
    pub device: Device,
    pub connections: Vec<DeviceConnection>,
}

pub struct ListKnownDevices {
    devices: Arc<dyn DeviceRepositoryPort>,
    connections: Arc<dyn ConnectionRepositoryPort>,
}

impl ListKnownDevices {
    pub fn new(
        devices: Arc<dyn DeviceRepositoryPort>,
        connections: Arc<dyn ConnectionRepositoryPort>,
    ) -> Self {
        Self {
            devices,
            connections,
        }
    }

    /// Known devices, most recently used first.
    pub async fn execute(&self) -> Result<Vec<KnownDevice>, DiscoverDeviceError> {
        let devices = self.devices.list_all().await?;
        let mut known = Vec::with_capacity(devices.len());
        for device in devices {
            let connections = self.connections.list_for_device(&device.device_id).await?;
            known.push(KnownDevice {
                device,
                connections,
            });
        }
        Ok(known)
    }
}
