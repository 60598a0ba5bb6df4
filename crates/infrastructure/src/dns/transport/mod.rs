pub mod tcp;

use async_trait::async_trait;
use std::time::Duration;
use tcpdns_domain::DomainError;

pub use tcp::{TcpConnectionPool, TcpTransport};

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: bytes::Bytes,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends one wire-format message and returns the raw reply.
    ///
    /// The whole exchange must finish within `timeout`, otherwise
    /// [`DomainError::QueryTimeout`] is returned.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
