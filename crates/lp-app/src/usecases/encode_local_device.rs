use std::sync::Arc;

use anyhow::Result;
use lp_core::codec::encode_device;
use serde_json::Value;

use super::get_local_device::GetLocalDevice;

/// Build the identity payload this machine answers peers with.
pub struct EncodeLocalDevice {
    local_device: Arc<GetLocalDevice>,
}

impl EncodeLocalDevice {
    pub fn new(local_device: Arc<GetLocalDevice>) -> Self {
        Self { local_device }
    }

    pub async fn execute(&self) -> Result<Value> {
        let device = self.local_device.execute().await?;
        Ok(encode_device(&device))
    }
}
