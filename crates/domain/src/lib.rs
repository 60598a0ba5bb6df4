//! tcpdns domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_response;
pub mod dns_server;
pub mod errors;
pub mod hostname_batch;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, OutputConfig, ResolverConfig};
pub use dns_query::{DnsQuery, QueryOutcome};
pub use dns_record::{RecordType, ResolvedRecord};
pub use dns_response::{AnswerItem, AnswerSet, DnsResponse};
pub use dns_server::DnsServerAddr;
pub use errors::DomainError;
pub use hostname_batch::{partition, HostnameBatch};
