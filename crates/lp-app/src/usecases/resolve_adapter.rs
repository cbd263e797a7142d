use std::net::IpAddr;
use std::sync::Arc;

use lp_core::device::AdapterName;
use lp_core::network::{candidate_ipv4, resolve_adapter};
use lp_core::ports::NetworkInterfacePort;
use tracing::debug;

/// Find the local adapter through which a peer address is reachable.
pub struct ResolveAdapter {
    interfaces: Arc<dyn NetworkInterfacePort>,
}

impl ResolveAdapter {
    pub fn new(interfaces: Arc<dyn NetworkInterfacePort>) -> Self {
        Self { interfaces }
    }

    /// Returns the adapter name, or `None` when no active interface covers
    /// `candidate`. Addresses without an IPv4 form are rejected before any
    /// interface is enumerated.
    pub fn execute(&self, candidate: IpAddr) -> Option<AdapterName> {
        if candidate_ipv4(candidate).is_none() {
            debug!(%candidate, "no IPv4 form, skipping adapter scan");
            return None;
        }

        let interfaces = self.interfaces.active_interfaces();
        let resolved = resolve_adapter(candidate, &interfaces);

        match &resolved {
            Some(name) => debug!(%candidate, adapter = %name, "adapter resolved"),
            None => debug!(
                %candidate,
                interfaces = interfaces.len(),
                "no active interface covers address"
            ),
        }

        resolved
    }
}
