use serde::{Deserialize, Serialize};

pub const DEVICE_IDENTITY_REQUEST: &str = "device_identity";

/// Longest line either side of the bridge accepts, newline included.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub request: String,
}

impl BridgeRequest {
    pub fn device_identity() -> Self {
        Self {
            request: DEVICE_IDENTITY_REQUEST.to_string(),
        }
    }

    pub fn is_device_identity(&self) -> bool {
        self.request == DEVICE_IDENTITY_REQUEST
    }
}

/// Serialize `value` as one newline-terminated line.
pub(crate) fn encode_line<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    Ok(line)
}
