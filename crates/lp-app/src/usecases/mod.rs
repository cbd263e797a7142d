//! Business logic use cases
//!
//! DiscoverDevice
//!     ├── IdentityBridgePort (fetch remote identity)
//!     ├── DecodeDeviceIdentity
//!     ├── GetLocalDevice (self check)
//!     └── ReconcileConnection
//!             └── ResolveAdapter

pub mod decode_device_identity;
pub mod discover_device;
pub mod encode_local_device;
pub mod get_local_device;
pub mod list_known_devices;
pub mod reconcile_connection;
pub mod resolve_adapter;

pub use decode_device_identity::DecodeDeviceIdentity;
pub use discover_device::{DiscoverDevice, DiscoverDeviceError, DiscoveryOutcome};
pub use encode_local_device::EncodeLocalDevice;
pub use get_local_device::{GetLocalDevice, APP_VERSION_CODE, APP_VERSION_NAME};
pub use list_known_devices::{KnownDevice, ListKnownDevices};
pub use reconcile_connection::ReconcileConnection;
pub use resolve_adapter::ResolveAdapter;

#[cfg(test)]
pub(crate) mod test_support;
