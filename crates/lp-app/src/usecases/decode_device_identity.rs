use std::sync::Arc;

use lp_core::codec::IdentityPayload;
use lp_core::device::Device;
use lp_core::ports::{ClockPort, DeviceRepositoryError, DeviceRepositoryPort};
use serde_json::Value;
use tracing::trace;

/// Turn a peer's identity payload into a [`Device`].
///
/// Decoding starts from the stored record for the same id, so fields that
/// never travel over the wire are kept. The wire fields then overwrite it.
pub struct DecodeDeviceIdentity {
    devices: Arc<dyn DeviceRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl DecodeDeviceIdentity {
    pub fn new(devices: Arc<dyn DeviceRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { devices, clock }
    }

    pub async fn execute(&self, payload: &Value) -> Result<Device, DeviceRepositoryError> {
        let payload = IdentityPayload::from_value(payload);
        let mut device = Device::new(payload.device_id());

        if device.is_identified() {
            let known = self.devices.reconstruct(&mut device).await?;
            trace!(device_id = %device.device_id, known, "decoding identity payload");
        }

        device.touch(self.clock.now_ms());
        payload.apply_to(&mut device);
        device.clamp_nickname();

        Ok(device)
    }
}
