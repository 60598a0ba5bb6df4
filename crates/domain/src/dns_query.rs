use super::{DnsResponse, RecordType};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }
}

/// Result of one (hostname, record type) lookup.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Answered(DnsResponse),
    Timeout,
    ProtocolError(String),
}

impl QueryOutcome {
    pub fn response(&self) -> Option<&DnsResponse> {
        match self {
            QueryOutcome::Answered(response) => Some(response),
            QueryOutcome::Timeout | QueryOutcome::ProtocolError(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, QueryOutcome::Answered(_))
    }
}
