//! # App
//!
//! Wires the use cases together over one set of [`AppDeps`]. Each use case is
//! created once and shared behind an `Arc`.

use std::sync::Arc;

use crate::deps::AppDeps;
use crate::usecases::{
    DecodeDeviceIdentity, DiscoverDevice, EncodeLocalDevice, GetLocalDevice, ListKnownDevices,
    ReconcileConnection, ResolveAdapter,
};

pub struct App {
    resolve_adapter: Arc<ResolveAdapter>,
    get_local_device: Arc<GetLocalDevice>,
    reconcile_connection: Arc<ReconcileConnection>,
    decode_device_identity: Arc<DecodeDeviceIdentity>,
    encode_local_device: Arc<EncodeLocalDevice>,
    discover_device: Arc<DiscoverDevice>,
    list_known_devices: Arc<ListKnownDevices>,
}

impl App {
    pub fn new(deps: AppDeps) -> Self {
        let resolve_adapter = Arc::new(ResolveAdapter::new(deps.network_interfaces.clone()));
        let get_local_device = Arc::new(GetLocalDevice::new(
            deps.device_identity.clone(),
            deps.settings.clone(),
            deps.platform.clone(),
        ));
        let reconcile_connection = Arc::new(ReconcileConnection::new(
            resolve_adapter.clone(),
            deps.connection_repo.clone(),
            deps.clock.clone(),
        ));
        let decode_device_identity = Arc::new(DecodeDeviceIdentity::new(
            deps.device_repo.clone(),
            deps.clock.clone(),
        ));
        let encode_local_device = Arc::new(EncodeLocalDevice::new(get_local_device.clone()));
        let discover_device = Arc::new(DiscoverDevice::new(
            deps.identity_bridge.clone(),
            decode_device_identity.clone(),
            get_local_device.clone(),
            reconcile_connection.clone(),
            deps.device_repo.clone(),
            deps.clock.clone(),
        ));
        let list_known_devices = Arc::new(ListKnownDevices::new(
            deps.device_repo.clone(),
            deps.connection_repo.clone(),
        ));

        Self {
            resolve_adapter,
            get_local_device,
            reconcile_connection,
            decode_device_identity,
            encode_local_device,
            discover_device,
            list_known_devices,
        }
    }

    pub fn resolve_adapter(&self) -> Arc<ResolveAdapter> {
        self.resolve_adapter.clone()
    }

    pub fn get_local_device(&self) -> Arc<GetLocalDevice> {
        self.get_local_device.clone()
    }

    pub fn reconcile_connection(&self) -> Arc<ReconcileConnection> {
        self.reconcile_connection.clone()
    }

    pub fn decode_device_identity(&self) -> Arc<DecodeDeviceIdentity> {
        self.decode_device_identity.clone()
    }

    pub fn encode_local_device(&self) -> Arc<EncodeLocalDevice> {
        self.encode_local_device.clone()
    }

    pub fn discover_device(&self) -> Arc<DiscoverDevice> {
        self.discover_device.clone()
    }

    pub fn list_known_devices(&self) -> Arc<ListKnownDevices> {
        self.list_known_devices.clone()
    }
}
