use crate::{
    device::{DeviceConnection, DeviceId},
    ports::errors::ConnectionRepositoryError,
};
use async_trait::async_trait;

#[async_trait]
pub trait ConnectionRepositoryPort: Send + Sync {
    /// Fill the adapter name of `connection` from the latest stored row for
    /// the same address (and the same device, when its id is already set).
    ///
    /// Returns whether a stored row was found.
    async fn reconstruct(
        &self,
        connection: &mut DeviceConnection,
    ) -> Result<bool, ConnectionRepositoryError>;

    /// Atomically drop every row of the same device that shares the adapter
    /// name or the address of `connection`, then insert `connection`.
    async fn replace(&self, connection: &DeviceConnection) -> Result<(), ConnectionRepositoryError>;

    async fn list_for_device(
        &self,
        device_id: &DeviceId,
    ) -> Result<Vec<DeviceConnection>, ConnectionRepositoryError>;
}
