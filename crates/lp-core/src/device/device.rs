use serde::{Deserialize, Serialize};

use super::value_objects::DeviceId;

/// Maximum number of characters kept from a peer-provided nickname.
pub const NICKNAME_LENGTH_MAX: usize = 32;

/// A participant in the local network, either this machine or a peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: DeviceId,
    pub brand: String,
    pub model: String,
    pub nickname: String,
    pub version_name: String,
    pub version_number: i32,
    /// Unix milliseconds of the last successful contact.
    pub last_usage_time: Option<i64>,
    /// Local-only flags, never sent over the wire.
    pub trusted: bool,
    pub restricted: bool,
}

impl Device {
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            ..Self::default()
        }
    }

    /// The value handed back when discovery learned nothing about a peer.
    pub fn unidentified() -> Self {
        Self::default()
    }

    pub fn is_identified(&self) -> bool {
        !self.device_id.is_empty()
    }

    pub fn touch(&mut self, now_ms: i64) {
        self.last_usage_time = Some(now_ms);
    }

    /// Apply the nickname length cap used for values coming from peers.
    ///
    /// A nickname longer than [`NICKNAME_LENGTH_MAX`] is cut to one character
    /// less than the cap.
    pub fn clamp_nickname(&mut self) {
        if self.nickname.chars().count() > NICKNAME_LENGTH_MAX {
            self.nickname = self
                .nickname
                .chars()
                .take(NICKNAME_LENGTH_MAX - 1)
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_nickname_keeps_short_values() {
        let mut device = Device::new(DeviceId::new("abc-1"));
        device.nickname = "Phone".to_string();
        device.clamp_nickname();
        assert_eq!(device.nickname, "Phone");
    }

    #[test]
    fn clamp_nickname_keeps_value_at_the_cap() {
        let mut device = Device::new(DeviceId::new("abc-1"));
        device.nickname = "n".repeat(NICKNAME_LENGTH_MAX);
        device.clamp_nickname();
        assert_eq!(device.nickname.chars().count(), NICKNAME_LENGTH_MAX);
    }

    #[test]
    fn clamp_nickname_cuts_long_values_below_the_cap() {
        let mut device = Device::new(DeviceId::new("abc-1"));
        device.nickname = "ü".repeat(NICKNAME_LENGTH_MAX + 10);
        device.clamp_nickname();
        assert_eq!(device.nickname.chars().count(), NICKNAME_LENGTH_MAX - 1);
    }

    #[test]
    fn unidentified_device_has_no_id() {
        assert!(!Device::unidentified().is_identified());
    }
}
