use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use lp_core::ports::{BridgeError, IdentityBridgePort, IdentitySession};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::protocol::{encode_line, BridgeRequest, MAX_LINE_BYTES};

/// Client side of the identity bridge. Every session is one TCP connection.
#[derive(Debug, Clone)]
pub struct TcpIdentityBridge {
    port: u16,
    timeout: Duration,
}

impl TcpIdentityBridge {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }
}

#[async_trait]
impl IdentityBridgePort for TcpIdentityBridge {
    async fn open(&self, address: IpAddr) -> Result<Box<dyn IdentitySession>, BridgeError> {
        let target = SocketAddr::new(address, self.port);
        let stream = timeout(self.timeout, TcpStream::connect(target))
            .await
            .map_err(|_| BridgeError::Timeout(self.timeout.as_millis() as u64))?
            .map_err(|e| BridgeError::Connect {
                address: target.to_string(),
                reason: e.to_string(),
            })?;
        stream
            .set_nodelay(true)
            .map_err(|e| BridgeError::Io(e.to_string()))?;

        debug!(peer = %target, "bridge session opened");
        Ok(Box::new(TcpIdentitySession {
            stream: Some(BufReader::new(stream)),
            timeout: self.timeout,
        }))
    }
}

struct TcpIdentitySession {
    stream: Option<BufReader<TcpStream>>,
    timeout: Duration,
}

impl TcpIdentitySession {
    async fn round_trip(
        stream: &mut BufReader<TcpStream>,
        request: &[u8],
    ) -> Result<Value, BridgeError> {
        stream
            .get_mut()
            .write_all(request)
            .await
            .map_err(|e| BridgeError::Io(e.to_string()))?;

        let mut line = String::new();
        let read = stream
            .take(MAX_LINE_BYTES as u64)
            .read_line(&mut line)
            .await
            .map_err(|e| BridgeError::Io(e.to_string()))?;
        if read == 0 {
            return Err(BridgeError::Closed);
        }
        if !line.ends_with('\n') {
            return Err(BridgeError::Malformed("response line too long".to_string()));
        }

        serde_json::from_str(line.trim_end()).map_err(|e| BridgeError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl IdentitySession for TcpIdentitySession {
    async fn fetch_device_identity(&mut self) -> Result<Value, BridgeError> {
        let stream = self.stream.as_mut().ok_or(BridgeError::Closed)?;
        let request = encode_line(&BridgeRequest::device_identity())
            .map_err(|e| BridgeError::Malformed(e.to_string()))?;

        timeout(self.timeout, Self::round_trip(stream, &request))
            .await
            .map_err(|_| BridgeError::Timeout(self.timeout.as_millis() as u64))?
    }

    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.get_mut().shutdown().await;
        }
    }
}
