pub mod forwarding;
pub mod transport;

pub use forwarding::TcpDnsForwarder;
pub use transport::{DnsTransport, TcpConnectionPool, TransportResponse};
