//! Wire codec for device identities exchanged between peers.

mod identity_payload;

pub use identity_payload::{encode_device, AppInfo, DeviceInfo, IdentityPayload};
