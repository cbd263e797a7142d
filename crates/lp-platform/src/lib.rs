//! # lp-platform
//!
//! Operating-system facing adapters: network interface enumeration, host
//! information and the TCP identity bridge.

pub mod adapters;
pub mod bridge;

pub use adapters::{HostPlatformInfo, NetdevInterfaces};
pub use bridge::{IdentityResponder, IdentitySource, TcpIdentityBridge};
