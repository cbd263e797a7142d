//! Peer discovery: fetch a peer's identity, record the connection and merge
//! the identity into the device store.

use std::net::IpAddr;
use std::sync::Arc;

use lp_core::device::{Device, DeviceConnection};
use lp_core::ports::{
    BridgeError, ClockPort, ConnectionRepositoryError, DeviceRepositoryError,
    DeviceRepositoryPort, IdentityBridgePort,
};
use tracing::{debug, info, info_span, warn, Instrument};

use super::decode_device_identity::DecodeDeviceIdentity;
use super::get_local_device::GetLocalDevice;
use super::reconcile_connection::ReconcileConnection;

#[derive(Debug, thiserror::Error)]
pub enum DiscoverDeviceError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("failed to describe local device: {0}")]
    LocalDevice(String),
}

impl From<DeviceRepositoryError> for DiscoverDeviceError {
    fn from(err: DeviceRepositoryError) -> Self {
        DiscoverDeviceError::Storage(err.to_string())
    }
}

impl From<ConnectionRepositoryError> for DiscoverDeviceError {
    fn from(err: ConnectionRepositoryError) -> Self {
        DiscoverDeviceError::Storage(err.to_string())
    }
}

/// Result of one discovery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The peer answered with an identity and the store was updated.
    Found { device: Device, is_local: bool },
    /// The peer answered but its identity carries no id; nothing was stored.
    Unidentified(Device),
    /// The peer could not be reached or did not answer sensibly.
    NotFound,
}

impl DiscoveryOutcome {
    /// The discovered device, or an unidentified one when nothing was learned.
    pub fn device(&self) -> Device {
        match self {
            DiscoveryOutcome::Found { device, .. } | DiscoveryOutcome::Unidentified(device) => {
                device.clone()
            }
            DiscoveryOutcome::NotFound => Device::unidentified(),
        }
    }

    pub fn into_device(self) -> Device {
        match self {
            DiscoveryOutcome::Found { device, .. } | DiscoveryOutcome::Unidentified(device) => {
                device
            }
            DiscoveryOutcome::NotFound => Device::unidentified(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, DiscoveryOutcome::Found { .. })
    }
}

pub struct DiscoverDevice {
    bridge: Arc<dyn IdentityBridgePort>,
    decode: Arc<DecodeDeviceIdentity>,
    local_device: Arc<GetLocalDevice>,
    reconcile: Arc<ReconcileConnection>,
    devices: Arc<dyn DeviceRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl DiscoverDevice {
    pub fn new(
        bridge: Arc<dyn IdentityBridgePort>,
        decode: Arc<DecodeDeviceIdentity>,
        local_device: Arc<GetLocalDevice>,
        reconcile: Arc<ReconcileConnection>,
        devices: Arc<dyn DeviceRepositoryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            bridge,
            decode,
            local_device,
            reconcile,
            devices,
            clock,
        }
    }

    /// Discover the device at `peer` and merge it into the store.
    ///
    /// Transport failures become [`DiscoveryOutcome::NotFound`]; store
    /// failures are returned as errors.
    pub async fn execute(&self, peer: IpAddr) -> Result<DiscoveryOutcome, DiscoverDeviceError> {
        let span = info_span!("usecase.discover_device.execute", %peer);

        async {
            let payload = match self.fetch_identity(peer).await {
                Ok(payload) => payload,
                Err(err) => {
                    warn!(error = %err, "peer did not provide an identity");
                    return Ok(DiscoveryOutcome::NotFound);
                }
            };

            let mut device = self.decode.execute(&payload).await?;
            if !device.is_identified() {
                debug!("peer answered without a device id");
                return Ok(DiscoveryOutcome::Unidentified(device));
            }

            // Taken after the remote identity arrived.
            let local = self
                .local_device
                .execute()
                .await
                .map_err(|e| DiscoverDeviceError::LocalDevice(format!("{e:#}")))?;

            let mut connection = DeviceConnection::new(peer);
            self.reconcile.execute(&device, &mut connection).await?;

            let is_local = local.device_id == device.device_id;
            if !is_local {
                device.touch(self.clock.now_ms());
                self.devices.publish(&device).await?;
            }

            info!(
                device_id = %device.device_id,
                nickname = %device.nickname,
                adapter = %connection.adapter_name,
                is_local,
                "device discovered"
            );

            Ok(DiscoveryOutcome::Found { device, is_local })
        }
        .instrument(span)
        .await
    }

    /// Run [`Self::execute`] on its own task and hand the outcome to
    /// `on_complete` exactly once.
    ///
    /// Returns immediately. A store failure inside the task is logged and
    /// reported as [`DiscoveryOutcome::NotFound`]. There is no way to cancel a
    /// started discovery; the bridge timeout bounds it.
    pub fn spawn<F>(self: Arc<Self>, peer: IpAddr, on_complete: F)
    where
        F: FnOnce(DiscoveryOutcome) + Send + 'static,
    {
        tokio::spawn(async move {
            let outcome = match self.execute(peer).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(%peer, error = %err, "background discovery failed");
                    DiscoveryOutcome::NotFound
                }
            };
            on_complete(outcome);
        });
    }

    async fn fetch_identity(&self, peer: IpAddr) -> Result<serde_json::Value, BridgeError> {
        let mut session = self.bridge.open(peer).await?;
        let result = session.fetch_device_identity().await;
        session.close().await;
        result
    }
}
