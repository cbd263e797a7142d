use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::device::{Device, DeviceId};

const KEYWORD_DEVICE_INFO: &str = "deviceInfo";
const KEYWORD_DEVICE_INFO_SERIAL: &str = "serial";
const KEYWORD_DEVICE_INFO_BRAND: &str = "brand";
const KEYWORD_DEVICE_INFO_MODEL: &str = "model";
const KEYWORD_DEVICE_INFO_USER: &str = "user";
const KEYWORD_APP_INFO: &str = "appInfo";
const KEYWORD_APP_INFO_VERSION_CODE: &str = "versionCode";
const KEYWORD_APP_INFO_VERSION_NAME: &str = "versionName";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub serial: String,
    pub brand: String,
    pub model: String,
    pub user: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub version_code: i32,
    pub version_name: String,
}

/// Identity payload a peer answers with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub device_info: DeviceInfo,
    pub app_info: AppInfo,
}

impl IdentityPayload {
    pub fn from_device(device: &Device) -> Self {
        Self {
            device_info: DeviceInfo {
                serial: device.device_id.as_str().to_string(),
                brand: device.brand.clone(),
                model: device.model.clone(),
                user: device.nickname.clone(),
            },
            app_info: AppInfo {
                version_code: device.version_number,
                version_name: device.version_name.clone(),
            },
        }
    }

    /// Read a payload field by field.
    ///
    /// Missing groups, missing keys and wrongly typed values all become
    /// empty strings or zero; this never fails.
    pub fn from_value(value: &Value) -> Self {
        let device_info = value.get(KEYWORD_DEVICE_INFO);
        let app_info = value.get(KEYWORD_APP_INFO);

        Self {
            device_info: DeviceInfo {
                serial: string_field(device_info, KEYWORD_DEVICE_INFO_SERIAL),
                brand: string_field(device_info, KEYWORD_DEVICE_INFO_BRAND),
                model: string_field(device_info, KEYWORD_DEVICE_INFO_MODEL),
                user: string_field(device_info, KEYWORD_DEVICE_INFO_USER),
            },
            app_info: AppInfo {
                version_code: int_field(app_info, KEYWORD_APP_INFO_VERSION_CODE),
                version_name: string_field(app_info, KEYWORD_APP_INFO_VERSION_NAME),
            },
        }
    }

    pub fn device_id(&self) -> DeviceId {
        DeviceId::new(self.device_info.serial.clone())
    }

    /// Write the wire fields over `device`, leaving local-only fields alone.
    pub fn apply_to(&self, device: &mut Device) {
        device.device_id = self.device_id();
        device.brand = self.device_info.brand.clone();
        device.model = self.device_info.model.clone();
        device.nickname = self.device_info.user.clone();
        device.version_number = self.app_info.version_code;
        device.version_name = self.app_info.version_name.clone();
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            KEYWORD_DEVICE_INFO: {
                KEYWORD_DEVICE_INFO_SERIAL: self.device_info.serial,
                KEYWORD_DEVICE_INFO_BRAND: self.device_info.brand,
                KEYWORD_DEVICE_INFO_MODEL: self.device_info.model,
                KEYWORD_DEVICE_INFO_USER: self.device_info.user,
            },
            KEYWORD_APP_INFO: {
                KEYWORD_APP_INFO_VERSION_CODE: self.app_info.version_code,
                KEYWORD_APP_INFO_VERSION_NAME: self.app_info.version_name,
            },
        })
    }
}

/// Encode a device into its two-group wire form.
pub fn encode_device(device: &Device) -> Value {
    IdentityPayload::from_device(device).to_value()
}

fn string_field(group: Option<&Value>, key: &str) -> String {
    group
        .and_then(|g| g.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn int_field(group: Option<&Value>, key: &str) -> i32 {
    group
        .and_then(|g| g.get(key))
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or_default()
}
