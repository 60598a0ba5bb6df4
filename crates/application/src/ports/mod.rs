mod dns_transport;
mod record_sink;

pub use dns_transport::DnsQueryTransport;
pub use record_sink::RecordSink;

// Re-export for convenience
pub use tcpdns_domain::{DnsQuery, DnsResponse};
