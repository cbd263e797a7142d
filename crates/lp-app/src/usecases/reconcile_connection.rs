use std::sync::Arc;

use lp_core::device::{AdapterName, Device, DeviceConnection};
use lp_core::ports::{ClockPort, ConnectionRepositoryError, ConnectionRepositoryPort};
use tracing::{debug, info_span, Instrument};

use super::resolve_adapter::ResolveAdapter;

/// Record that `device` was just reached at a connection's address.
///
/// Keeps at most one stored connection per (device, adapter) and per
/// (device, address).
pub struct ReconcileConnection {
    resolver: Arc<ResolveAdapter>,
    connections: Arc<dyn ConnectionRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl ReconcileConnection {
    pub fn new(
        resolver: Arc<ResolveAdapter>,
        connections: Arc<dyn ConnectionRepositoryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            resolver,
            connections,
            clock,
        }
    }

    /// Fill in `connection` for `device` and store it, replacing older rows.
    pub async fn execute(
        &self,
        device: &Device,
        connection: &mut DeviceConnection,
    ) -> Result<(), ConnectionRepositoryError> {
        let span = info_span!(
            "usecase.reconcile_connection.execute",
            device_id = %device.device_id,
            address = %connection.host_address,
        );

        async {
            match self.resolver.execute(connection.host_address) {
                Some(adapter) => connection.adapter_name = adapter,
                None => {
                    if !self.connections.reconstruct(connection).await? {
                        connection.adapter_name = AdapterName::unknown();
                    }
                }
            }

            connection.last_checked_date = self.clock.now_ms();
            connection.device_id = device.device_id.clone();

            debug!(
                adapter = %connection.adapter_name,
                ip_address = %connection.ip_address(),
                "processing connection"
            );

            self.connections.replace(connection).await
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FakeClock, FakeInterfaces, InMemoryConnections};
    use lp_core::device::DeviceId;
    use lp_core::network::{AddressEntry, NetworkInterface};
    use std::net::{IpAddr, Ipv4Addr};

    const NETMASK: u32 = 3_232_235_776;

    fn in_range(offset: u32) -> IpAddr {
        IpAddr::V4(Ipv4Addr::from(NETMASK - offset))
    }

    fn peer() -> Device {
        Device::new(DeviceId::new("peer-1"))
    }

    fn build(
        interfaces: Vec<NetworkInterface>,
        connections: Arc<InMemoryConnections>,
        clock: Arc<FakeClock>,
    ) -> ReconcileConnection {
        let resolver = Arc::new(ResolveAdapter::new(Arc::new(FakeInterfaces::new(interfaces))));
        ReconcileConnection::new(resolver, connections, clock)
    }

    fn eth0() -> Vec<NetworkInterface> {
        vec![NetworkInterface::new(
            "eth0",
            vec![AddressEntry::ipv4(
                Ipv4Addr::new(192, 168, 1, 10),
                Ipv4Addr::from(NETMASK),
            )],
        )]
    }

    #[tokio::test]
    async fn stamps_and_stores_resolved_connection() {
        let connections = Arc::new(InMemoryConnections::default());
        let use_case = build(eth0(), connections.clone(), Arc::new(FakeClock::at(1_000)));
        let mut connection = DeviceConnection::new(in_range(20));

        use_case.execute(&peer(), &mut connection).await.unwrap();

        assert_eq!(connection.adapter_name, AdapterName::new("eth0"));
        assert_eq!(connection.device_id.as_str(), "peer-1");
        assert_eq!(connection.last_checked_date, 1_000);
        assert_eq!(connections.rows(), vec![connection]);
    }

    #[tokio::test]
    async fn repeated_contact_keeps_one_row_per_adapter() {
        let connections = Arc::new(InMemoryConnections::default());
        let clock = Arc::new(FakeClock::at(1_000));
        let use_case = build(eth0(), connections.clone(), clock.clone());

        let mut first = DeviceConnection::new(in_range(20));
        use_case.execute(&peer(), &mut first).await.unwrap();
        clock.advance(500);
        // Same adapter, new address after a DHCP renewal.
        let mut second = DeviceConnection::new(in_range(30));
        use_case.execute(&peer(), &mut second).await.unwrap();

        let rows = connections.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].host_address, in_range(30));
        assert_eq!(rows[0].last_checked_date, 1_500);
    }

    #[tokio::test]
    async fn unresolved_address_reuses_stored_adapter() {
        let connections = Arc::new(InMemoryConnections::default());
        let address = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));
        connections.insert(DeviceConnection {
            host_address: address,
            adapter_name: AdapterName::new("wlan0"),
            device_id: DeviceId::new("peer-1"),
            last_checked_date: 10,
        });
        let use_case = build(Vec::new(), connections.clone(), Arc::new(FakeClock::at(2_000)));
        let mut connection = DeviceConnection::new(address);

        use_case.execute(&peer(), &mut connection).await.unwrap();

        assert_eq!(connection.adapter_name, AdapterName::new("wlan0"));
        let rows = connections.rows();
        assert_eq!(rows.len(), 1, "stale row for the same address is replaced");
        assert_eq!(rows[0].last_checked_date, 2_000);
    }

    #[tokio::test]
    async fn unresolved_unknown_address_uses_sentinel() {
        let connections = Arc::new(InMemoryConnections::default());
        let use_case = build(Vec::new(), connections.clone(), Arc::new(FakeClock::at(1)));
        let mut connection = DeviceConnection::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)));
        connection.adapter_name = AdapterName::new("stale");

        use_case.execute(&peer(), &mut connection).await.unwrap();

        assert!(connection.adapter_name.is_unknown());
    }

    #[tokio::test]
    async fn other_devices_rows_are_left_alone() {
        let connections = Arc::new(InMemoryConnections::default());
        let use_case = build(eth0(), connections.clone(), Arc::new(FakeClock::at(1)));

        let mut a = DeviceConnection::new(in_range(20));
        use_case.execute(&peer(), &mut a).await.unwrap();
        let mut b = DeviceConnection::new(in_range(20));
        use_case
            .execute(&Device::new(DeviceId::new("peer-2")), &mut b)
            .await
            .unwrap();

        assert_eq!(connections.rows().len(), 2);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let connections = Arc::new(InMemoryConnections::failing());
        let use_case = build(eth0(), connections, Arc::new(FakeClock::at(1)));
        let mut connection = DeviceConnection::new(in_range(20));

        let result = use_case.execute(&peer(), &mut connection).await;

        assert!(matches!(result, Err(ConnectionRepositoryError::Storage(_))));
    }
}
