use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::{DnsTransport, TcpConnectionPool};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tcpdns_application::ports::DnsQueryTransport;
use tcpdns_domain::{DnsQuery, DnsResponse, DnsServerAddr, DomainError, RecordType};
use tracing::debug;

/// Sends queries to a DNS server over TCP.
///
/// Idle connections are kept in a pool shared by every clone of the
/// forwarder, so concurrent workers reuse each other's connections.
#[derive(Clone, Default)]
pub struct TcpDnsForwarder {
    pool: Arc<TcpConnectionPool>,
}

impl TcpDnsForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(pool: Arc<TcpConnectionPool>) -> Self {
        Self { pool }
    }

    /// Query a specific DNS server
    pub async fn lookup(
        &self,
        server: &DnsServerAddr,
        domain: &str,
        record_type: &RecordType,
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let (id, request_bytes) = MessageBuilder::build_query_with_id(domain, record_type)?;

        let transport = TcpTransport::with_pool(server.socket_addr(), Arc::clone(&self.pool));
        let response = transport.send(&request_bytes, timeout).await?;

        debug!(
            domain = %domain,
            record_type = %record_type,
            protocol = response.protocol_used,
            "Response received"
        );

        ResponseParser::parse(&response.bytes, id)
    }
}

#[async_trait]
impl DnsQueryTransport for TcpDnsForwarder {
    async fn query(
        &self,
        query: &DnsQuery,
        server: &DnsServerAddr,
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        self.lookup(server, &query.domain, &query.record_type, timeout)
            .await
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
