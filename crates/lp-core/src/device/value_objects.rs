use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier for a new installation.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id marks a device whose identity could not be learned.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DeviceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Name of the local network interface a peer was reached through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterName(String);

impl AdapterName {
    /// Sentinel stored when no local interface covers the peer address.
    pub const UNKNOWN_VALUE: &'static str = "unk0";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN_VALUE.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN_VALUE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AdapterName {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for AdapterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_uuids() {
        let a = DeviceId::generate();
        let b = DeviceId::generate();
        assert_ne!(a, b);
        uuid::Uuid::parse_str(a.as_str()).expect("generated id should be a UUID");
    }

    #[test]
    fn blank_device_id_is_empty() {
        assert!(DeviceId::default().is_empty());
        assert!(DeviceId::new("  ").is_empty());
        assert!(!DeviceId::new("abc-1").is_empty());
    }

    #[test]
    fn adapter_name_defaults_to_unknown_sentinel() {
        let name = AdapterName::default();
        assert!(name.is_unknown());
        assert_eq!(name.as_str(), "unk0");
        assert!(!AdapterName::new("eth0").is_unknown());
    }
}
