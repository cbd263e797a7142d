use crate::{
    device::{Device, DeviceId},
    ports::errors::DeviceRepositoryError,
};
use async_trait::async_trait;

#[async_trait]
pub trait DeviceRepositoryPort: Send + Sync {
    /// Look up a device by its identifier.
    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, DeviceRepositoryError>;

    /// Fill `device` from the stored record with the same identifier.
    ///
    /// Returns `false` and leaves `device` untouched when nothing is stored.
    async fn reconstruct(&self, device: &mut Device) -> Result<bool, DeviceRepositoryError> {
        match self.find_by_id(&device.device_id).await? {
            Some(stored) => {
                *device = stored;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Insert or overwrite the record keyed by `device.device_id`.
    async fn publish(&self, device: &Device) -> Result<(), DeviceRepositoryError>;

    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceRepositoryError>;

    /// All known devices, most recently used first.
    async fn list_all(&self) -> Result<Vec<Device>, DeviceRepositoryError>;
}
