use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::protocol::{encode_line, BridgeRequest, MAX_LINE_BYTES};

/// Connections that send nothing for this long are closed.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Supplies the payload the responder answers identity requests with.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn identity(&self) -> anyhow::Result<Value>;
}

/// Server side of the identity bridge.
pub struct IdentityResponder {
    listener: TcpListener,
    source: Arc<dyn IdentitySource>,
    idle_timeout: Duration,
}

impl IdentityResponder {
    pub async fn bind(addr: SocketAddr, source: Arc<dyn IdentitySource>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            source,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        })
    }

    /// How long a connection may wait for its next request line.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever. Each connection is served on its own
    /// task; a failed accept is logged and retried after a short pause.
    pub async fn serve(self) -> anyhow::Result<()> {
        info!(addr = %self.listener.local_addr()?, "identity responder listening");
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let source = self.source.clone();
                    let idle_timeout = self.idle_timeout;
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, source, idle_timeout).await {
                            warn!(%peer, error = %e, "bridge connection failed");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "failed to accept bridge connection");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                }
            }
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    source: Arc<dyn IdentitySource>,
    idle_timeout: Duration,
) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    loop {
        let mut line = String::new();
        let read = match timeout(
            idle_timeout,
            (&mut reader).take(MAX_LINE_BYTES as u64).read_line(&mut line),
        )
        .await
        {
            Ok(read) => read?,
            Err(_) => {
                debug!("closing idle bridge connection");
                return Ok(());
            }
        };
        if read == 0 {
            return Ok(());
        }
        if !line.ends_with('\n') && read >= MAX_LINE_BYTES {
            reply(&mut writer, &json!({ "error": "request line too long" })).await?;
            anyhow::bail!("request line exceeds {} bytes", MAX_LINE_BYTES);
        }

        let response = match serde_json::from_str::<BridgeRequest>(line.trim_end()) {
            Ok(request) if request.is_device_identity() => {
                debug!("answering identity request");
                source.identity().await?
            }
            Ok(request) => json!({ "error": format!("unsupported request: {}", request.request) }),
            Err(e) => json!({ "error": format!("malformed request: {}", e) }),
        };
        reply(&mut writer, &response).await?;
    }
}

async fn reply(writer: &mut OwnedWriteHalf, response: &Value) -> anyhow::Result<()> {
    writer.write_all(&encode_line(response)?).await?;
    Ok(())
}
