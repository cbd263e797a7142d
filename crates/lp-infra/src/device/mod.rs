//! Device identity backed by the settings document.
//!
//! The id is generated once, written to settings and never changed. The
//! application should not start without one.

use anyhow::Result;
use lp_core::device::DeviceId;
use lp_core::ports::{DeviceIdentityPort, SettingsPort};
use tracing::info;

pub struct SettingsDeviceIdentity {
    device_id: DeviceId,
}

impl SettingsDeviceIdentity {
    /// Load the stored device id, generating and persisting a UUID v4 when
    /// none (or a blank one) is stored. Surrounding whitespace is dropped.
    pub async fn load_or_create(settings: &dyn SettingsPort) -> Result<Self> {
        let mut current = settings.load().await?;

        let stored = current
            .device
            .device_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(DeviceId::new);

        let device_id = match stored {
            Some(id) => id,
            None => {
                let id = DeviceId::generate();
                current.device.device_id = Some(id.as_str().to_string());
                settings.save(&current).await?;
                info!(device_id = %id, "generated device id");
                id
            }
        };

        Ok(Self { device_id })
    }
}

impl DeviceIdentityPort for SettingsDeviceIdentity {
    fn current_device_id(&self) -> DeviceId {
        self.device_id.clone()
    }
}
