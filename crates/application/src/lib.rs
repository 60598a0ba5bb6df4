//! tcpdns application layer: ports and the batch resolution use cases.
pub mod ports;
pub mod services;
pub mod use_cases;
