use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// Assigned on first use and never changed afterwards.
    #[serde(default)]
    pub device_id: Option<String>,

    /// User-chosen display name; the host name is used when unset.
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Per-installation application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub device: DeviceSettings,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            device: DeviceSettings::default(),
        }
    }
}
