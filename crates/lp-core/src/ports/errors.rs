use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceRepositoryError {
    #[error("device not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ConnectionRepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// Failures of the identity bridge. All of them mean "peer not reachable".
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    #[error("bridge request timed out after {0} ms")]
    Timeout(u64),

    #[error("bridge i/o failed: {0}")]
    Io(String),

    #[error("malformed bridge response: {0}")]
    Malformed(String),

    #[error("session already closed")]
    Closed,
}
