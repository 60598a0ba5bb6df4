use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dashmap::DashMap;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tcpdns_domain::DomainError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;
const MAX_IDLE_TCP_PER_HOST: usize = 2;

/// Idle connections per server.
pub type TcpConnectionPool = DashMap<SocketAddr, Vec<TcpStream>>;

pub struct TcpTransport {
    server_addr: SocketAddr,
    pool: Arc<TcpConnectionPool>,
}

impl TcpTransport {
    pub fn with_pool(server_addr: SocketAddr, pool: Arc<TcpConnectionPool>) -> Self {
        Self { server_addr, pool }
    }

    fn take_pooled(&self) -> Option<TcpStream> {
        self.pool.get_mut(&self.server_addr)?.pop()
    }

    fn return_to_pool(&self, stream: TcpStream) {
        let mut entry = self.pool.entry(self.server_addr).or_default();
        if entry.len() < MAX_IDLE_TCP_PER_HOST {
            entry.push(stream);
        }
    }

    async fn connect_new(&self) -> Result<TcpStream, DomainError> {
        let stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::ConnectionRefused => DomainError::Transport(format!(
                    "Connection refused by TCP server {}",
                    self.server_addr
                )),
                _ => DomainError::Transport(format!(
                    "Failed to connect to TCP server {}: {}",
                    self.server_addr, e
                )),
            })?;

        stream.set_nodelay(true).map_err(|e| {
            DomainError::Transport(format!(
                "Failed to set TCP_NODELAY on {}: {}",
                self.server_addr, e
            ))
        })?;

        Ok(stream)
    }

    /// One request/response on a pooled connection if there is one, falling
    /// back to a fresh connection when the pooled one turns out to be dead.
    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        if let Some(mut stream) = self.take_pooled() {
            match round_trip(&mut stream, message_bytes).await {
                Ok(response) => {
                    self.return_to_pool(stream);
                    return Ok(response);
                }
                Err(e) => {
                    debug!(server = %self.server_addr, error = %e, "Pooled TCP connection failed, reconnecting");
                }
            }
        }

        let mut stream = self.connect_new().await?;
        let response = round_trip(&mut stream, message_bytes).await?;
        self.return_to_pool(stream);
        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "Sending TCP query"
        );

        let response_bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| {
                debug!(server = %self.server_addr, timeout_ms = timeout.as_millis() as u64, "TCP query timed out");
                DomainError::QueryTimeout
            })??;

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: bytes::Bytes::from(response_bytes),
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

async fn round_trip(stream: &mut TcpStream, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
    send_with_length_prefix(stream, message_bytes).await?;
    read_with_length_prefix(stream).await
}

/// Writes a message framed with its 2-byte big-endian length (RFC 1035 4.2.2).
pub async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    if message_bytes.len() > MAX_TCP_MESSAGE_SIZE {
        return Err(DomainError::Transport(format!(
            "Message too large: {} bytes (max {})",
            message_bytes.len(),
            MAX_TCP_MESSAGE_SIZE
        )));
    }

    let length_bytes = (message_bytes.len() as u16).to_be_bytes();

    stream
        .write_all(&length_bytes)
        .await
        .map_err(|e| DomainError::Transport(format!("Failed to write length prefix: {}", e)))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| DomainError::Transport(format!("Failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::Transport(format!("Failed to flush stream: {}", e)))?;

    Ok(())
}

/// Reads one length-prefixed message.
pub async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::Transport(format!("Failed to read response length: {}", e)))?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    let mut response = vec![0u8; response_len];
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| DomainError::Transport(format!("Failed to read response body: {}", e)))?;

    Ok(response)
}
