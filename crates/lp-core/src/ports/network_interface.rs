use crate::network::NetworkInterface;

/// Enumerates the host's network interfaces.
pub trait NetworkInterfacePort: Send + Sync {
    /// Interfaces that currently have an operational link, with their
    /// assigned addresses.
    fn active_interfaces(&self) -> Vec<NetworkInterface>;
}
