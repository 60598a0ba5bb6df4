use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tcpdns_application::ports::DnsQueryTransport;
use tcpdns_domain::{
    AnswerItem, AnswerSet, DnsQuery, DnsResponse, DnsServerAddr, DomainError, RecordType,
};

type Key = (String, RecordType);

/// Scripted transport: answers from a table, empty NOERROR responses for
/// anything not scripted, and a log of every call.
#[derive(Clone, Default)]
pub struct MockDnsTransport {
    responses: Arc<Mutex<HashMap<Key, Result<DnsResponse, DomainError>>>>,
    host_errors: Arc<Mutex<HashMap<String, DomainError>>>,
    calls: Arc<Mutex<Vec<Key>>>,
    delay: Option<Duration>,
}

impl MockDnsTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every answer is delayed, to let workers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_response(&self, hostname: &str, record_type: RecordType, response: DnsResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert((hostname.to_string(), record_type), Ok(response));
    }

    pub fn set_error(&self, hostname: &str, record_type: RecordType, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert((hostname.to_string(), record_type), Err(error));
    }

    /// Fails every record type of `hostname`.
    pub fn set_host_error(&self, hostname: &str, error: DomainError) {
        self.host_errors
            .lock()
            .unwrap()
            .insert(hostname.to_string(), error);
    }

    pub fn calls(&self) -> Vec<Key> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, hostname: &str) -> Vec<RecordType> {
        self.calls()
            .into_iter()
            .filter(|(host, _)| host == hostname)
            .map(|(_, rt)| rt)
            .collect()
    }
}

#[async_trait]
impl DnsQueryTransport for MockDnsTransport {
    async fn query(
        &self,
        query: &DnsQuery,
        _server: &DnsServerAddr,
        _timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let key = (query.domain.to_string(), query.record_type);
        self.calls.lock().unwrap().push(key.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.host_errors.lock().unwrap().get(key.0.as_str()).cloned() {
            return Err(err);
        }

        self.responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(DnsResponse::default()))
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}

fn owner(hostname: &str) -> String {
    format!("{}.", hostname)
}

pub fn a_response(hostname: &str, ips: &[&str]) -> DnsResponse {
    let items = ips
        .iter()
        .map(|ip| AnswerItem::Address(ip.parse().unwrap()))
        .collect();
    DnsResponse::new(vec![AnswerSet::new(owner(hostname), 1, items)])
}

pub fn aaaa_response(hostname: &str, ips: &[&str]) -> DnsResponse {
    let items = ips
        .iter()
        .map(|ip| AnswerItem::Address(ip.parse().unwrap()))
        .collect();
    DnsResponse::new(vec![AnswerSet::new(owner(hostname), 28, items)])
}

pub fn cname_response(hostname: &str, target: &str) -> DnsResponse {
    DnsResponse::new(vec![AnswerSet::new(
        owner(hostname),
        5,
        vec![AnswerItem::Name(target.to_string())],
    )])
}
