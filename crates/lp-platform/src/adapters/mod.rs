mod network_interfaces;
mod platform_info;

pub use network_interfaces::NetdevInterfaces;
pub use platform_info::HostPlatformInfo;
