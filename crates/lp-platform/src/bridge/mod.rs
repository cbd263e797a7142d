//! Line-delimited JSON bridge over TCP.
//!
//! A client sends `{"request":"device_identity"}` followed by a newline; the
//! responder answers with the identity payload on one line.

mod client;
mod protocol;
mod responder;

pub use client::TcpIdentityBridge;
pub use protocol::{BridgeRequest, DEVICE_IDENTITY_REQUEST, MAX_LINE_BYTES};
pub use responder::{IdentityResponder, IdentitySource, DEFAULT_IDLE_TIMEOUT};
