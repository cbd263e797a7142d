use std::sync::Arc;

use anyhow::{Context, Result};
use lp_core::device::Device;
use lp_core::ports::{DeviceIdentityPort, PlatformInfoPort, SettingsPort};

pub const APP_VERSION_NAME: &str = env!("CARGO_PKG_VERSION");
pub const APP_VERSION_CODE: i32 = 1;

/// Describe this machine as a [`Device`].
///
/// The identifier comes from the device identity port; the nickname is read
/// from settings and every other attribute is collected fresh on each call.
pub struct GetLocalDevice {
    identity: Arc<dyn DeviceIdentityPort>,
    settings: Arc<dyn SettingsPort>,
    platform: Arc<dyn PlatformInfoPort>,
}

impl GetLocalDevice {
    pub fn new(
        identity: Arc<dyn DeviceIdentityPort>,
        settings: Arc<dyn SettingsPort>,
        platform: Arc<dyn PlatformInfoPort>,
    ) -> Self {
        Self {
            identity,
            settings,
            platform,
        }
    }

    pub async fn execute(&self) -> Result<Device> {
        let settings = self
            .settings
            .load()
            .await
            .context("load settings for local device")?;

        let mut device = Device::new(self.identity.current_device_id());
        device.brand = self.platform.brand();
        device.model = self.platform.model();
        // The configured nickname is sent as is; only incoming ones are capped.
        device.nickname = usable_nickname(settings.device.nickname)
            .unwrap_or_else(|| self.platform.host_name());
        device.version_name = APP_VERSION_NAME.to_string();
        device.version_number = APP_VERSION_CODE;

        Ok(device)
    }
}

fn usable_nickname(value: Option<String>) -> Option<String> {
    value.filter(|name| !name.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FakePlatform, FixedIdentity, InMemorySettings};
    use lp_core::device::NICKNAME_LENGTH_MAX;
    use lp_core::settings::Settings;

    mockall::mock! {
        pub SettingsStore {}

        #[async_trait::async_trait]
        impl SettingsPort for SettingsStore {
            async fn load(&self) -> anyhow::Result<Settings>;
            async fn save(&self, settings: &Settings) -> anyhow::Result<()>;
        }
    }

    fn use_case(settings: Arc<dyn SettingsPort>) -> GetLocalDevice {
        GetLocalDevice::new(
            Arc::new(FixedIdentity::new("abc-1")),
            settings,
            Arc::new(FakePlatform),
        )
    }

    #[tokio::test]
    async fn uses_identity_port_and_live_attributes() {
        let settings = Arc::new(InMemorySettings::default());
        settings.set_nickname("Phone");

        let device = use_case(settings.clone()).execute().await.expect("local device");

        assert_eq!(device.device_id.as_str(), "abc-1");
        assert_eq!(device.nickname, "Phone");
        assert_eq!(device.brand, "Linux");
        assert_eq!(device.model, "test-host");
        assert_eq!(device.version_name, APP_VERSION_NAME);
        assert_eq!(device.version_number, APP_VERSION_CODE);
        assert_eq!(device.last_usage_time, None);
        assert_eq!(settings.saves(), 0);
    }

    #[tokio::test]
    async fn id_stored_in_settings_does_not_override_identity_port() {
        let settings = Arc::new(InMemorySettings::with_device_id("someone-else"));

        let device = use_case(settings).execute().await.unwrap();

        assert_eq!(device.device_id.as_str(), "abc-1");
    }

    #[tokio::test]
    async fn falls_back_to_host_name() {
        let settings = Arc::new(InMemorySettings::default());
        let use_case = use_case(settings.clone());
        assert_eq!(use_case.execute().await.unwrap().nickname, "test-host");

        settings.set_nickname("   ");
        assert_eq!(use_case.execute().await.unwrap().nickname, "test-host");
    }

    #[tokio::test]
    async fn configured_nickname_is_not_capped() {
        let settings = Arc::new(InMemorySettings::default());
        let long = "x".repeat(NICKNAME_LENGTH_MAX + 1);
        settings.set_nickname(&long);

        let device = use_case(settings).execute().await.unwrap();

        assert_eq!(device.nickname, long);
    }

    #[tokio::test]
    async fn settings_failure_is_reported() {
        let mut settings = MockSettingsStore::new();
        settings
            .expect_load()
            .returning(|| Err(anyhow::anyhow!("settings file unreadable")));

        let err = use_case(Arc::new(settings)).execute().await.unwrap_err();

        assert!(format!("{err:#}").contains("settings file unreadable"));
    }
}
