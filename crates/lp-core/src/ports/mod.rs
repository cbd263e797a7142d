//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `lp-app` and the
//! infrastructure/platform implementations. The core never talks to SQLite,
//! sockets or the operating system directly.

mod clock;
pub mod connection_repository;
pub mod device_identity;
pub mod device_repository;
pub mod errors;
pub mod identity_bridge;
pub mod network_interface;
pub mod platform_info;
pub mod settings;

pub use clock::*;
pub use connection_repository::ConnectionRepositoryPort;
pub use device_identity::DeviceIdentityPort;
pub use device_repository::DeviceRepositoryPort;
pub use errors::{BridgeError, ConnectionRepositoryError, DeviceRepositoryError};
pub use identity_bridge::{IdentityBridgePort, IdentitySession};
pub use network_interface::NetworkInterfacePort;
pub use platform_info::PlatformInfoPort;
pub use settings::SettingsPort;
