use lp_core::network::{AddressEntry, NetworkInterface};
use lp_core::ports::NetworkInterfacePort;
use tracing::{debug, trace};

/// Enumerates interfaces through `netdev`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetdevInterfaces;

impl NetdevInterfaces {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkInterfacePort for NetdevInterfaces {
    fn active_interfaces(&self) -> Vec<NetworkInterface> {
        let mut active = Vec::new();

        for iface in netdev::get_interfaces() {
            if !iface.is_up() || !iface.is_running() {
                trace!(interface = %iface.name, "skipping inactive interface");
                continue;
            }

            let entries: Vec<AddressEntry> = iface
                .ipv4
                .iter()
                .map(|net| AddressEntry::ipv4(net.addr(), net.netmask()))
                .collect();

            debug!(
                interface = %iface.name,
                addresses = entries.len(),
                "active interface"
            );
            active.push(NetworkInterface::new(iface.name.clone(), entries));
        }

        active
    }
}
