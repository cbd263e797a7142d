//! Request/response bridge used to ask a peer for its identity.

use std::net::IpAddr;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::errors::BridgeError;

#[async_trait]
pub trait IdentityBridgePort: Send + Sync {
    /// Open a session towards `address`. Cheap to call once per discovery.
    async fn open(&self, address: IpAddr) -> Result<Box<dyn IdentitySession>, BridgeError>;
}

#[async_trait]
pub trait IdentitySession: Send {
    /// Ask the peer for its identity payload.
    async fn fetch_device_identity(&mut self) -> Result<Value, BridgeError>;

    /// Release the session. Calling it twice is harmless.
    async fn close(&mut self);
}
