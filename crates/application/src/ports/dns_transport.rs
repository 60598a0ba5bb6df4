use async_trait::async_trait;
use std::time::Duration;
use tcpdns_domain::{DnsQuery, DnsResponse, DnsServerAddr, DomainError};

/// Sends one query to a DNS server and returns the parsed response.
///
/// Implementations signal an expired deadline with
/// [`DomainError::QueryTimeout`]; every other error is treated as a protocol
/// failure by the caller.
#[async_trait]
pub trait DnsQueryTransport: Send + Sync {
    async fn query(
        &self,
        query: &DnsQuery,
        server: &DnsServerAddr,
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
