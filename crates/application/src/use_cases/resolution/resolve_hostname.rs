use crate::ports::DnsQueryTransport;
use std::sync::Arc;
use std::time::Duration;
use tcpdns_domain::{DnsQuery, DnsResponse, DnsServerAddr, QueryOutcome, RecordType};
use tracing::debug;

/// Outcomes for one hostname, one per record type in query order.
#[derive(Debug, Clone)]
pub struct HostnameResolution {
    pub hostname: Arc<str>,
    pub outcomes: Vec<(RecordType, QueryOutcome)>,
}

impl HostnameResolution {
    fn failed(hostname: Arc<str>, outcome: QueryOutcome) -> Self {
        let outcomes = RecordType::QUERY_ORDER
            .iter()
            .map(|rt| (*rt, outcome.clone()))
            .collect();
        Self { hostname, outcomes }
    }

    /// The timeout or protocol error that stopped this hostname, if any.
    pub fn failure(&self) -> Option<&QueryOutcome> {
        self.outcomes
            .iter()
            .map(|(_, outcome)| outcome)
            .find(|outcome| outcome.is_failure())
    }

    pub fn is_failed(&self) -> bool {
        self.failure().is_some()
    }

    pub fn responses(&self) -> impl Iterator<Item = (RecordType, &DnsResponse)> {
        self.outcomes
            .iter()
            .filter_map(|(rt, outcome)| outcome.response().map(|response| (*rt, response)))
    }
}

pub struct ResolveHostnameUseCase {
    transport: Arc<dyn DnsQueryTransport>,
    server: DnsServerAddr,
    timeout: Duration,
}

impl ResolveHostnameUseCase {
    pub fn new(
        transport: Arc<dyn DnsQueryTransport>,
        server: DnsServerAddr,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            server,
            timeout,
        }
    }

    pub fn server(&self) -> &DnsServerAddr {
        &self.server
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Queries A, CNAME and AAAA in that order.
    ///
    /// The first timeout or error stops the remaining queries and marks every
    /// record type of this hostname with that failure. Never fails itself.
    pub async fn execute(&self, hostname: &str) -> HostnameResolution {
        let hostname: Arc<str> = Arc::from(hostname);
        let mut outcomes = Vec::with_capacity(RecordType::QUERY_ORDER.len());

        for record_type in RecordType::QUERY_ORDER {
            let query = DnsQuery::new(Arc::clone(&hostname), record_type);

            match self
                .transport
                .query(&query, &self.server, self.timeout)
                .await
            {
                Ok(response) => {
                    debug!(
                        hostname = %hostname,
                        record_type = %record_type,
                        rcode = response.rcode,
                        answers = response.answer_count(),
                        protocol = self.transport.protocol_name(),
                        "Query answered"
                    );
                    outcomes.push((record_type, QueryOutcome::Answered(response)));
                }
                Err(e) => {
                    debug!(
                        hostname = %hostname,
                        record_type = %record_type,
                        server = %self.server,
                        error = %e,
                        "Query failed, skipping remaining record types"
                    );
                    let outcome = if e.is_timeout() {
                        QueryOutcome::Timeout
                    } else {
                        QueryOutcome::ProtocolError(e.to_string())
                    };
                    return HostnameResolution::failed(hostname, outcome);
                }
            }
        }

        HostnameResolution { hostname, outcomes }
    }
}
