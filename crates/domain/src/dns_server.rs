use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::DomainError;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Address of the DNS server queried over TCP.
///
/// Accepts `8.8.8.8`, `8.8.8.8:5353`, `2001:4860:4860::8888`,
/// `[2001:4860:4860::8888]:53`, each optionally prefixed with `tcp://`.
/// The port defaults to 53.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DnsServerAddr(SocketAddr);

impl DnsServerAddr {
    pub fn new(addr: SocketAddr) -> Self {
        Self(addr)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }

    pub fn port(&self) -> u16 {
        self.0.port()
    }
}

impl Default for DnsServerAddr {
    fn default() -> Self {
        Self(SocketAddr::new(IpAddr::from([8, 8, 8, 8]), DEFAULT_DNS_PORT))
    }
}

impl fmt::Display for DnsServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SocketAddr> for DnsServerAddr {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl FromStr for DnsServerAddr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let addr_str = trimmed.strip_prefix("tcp://").unwrap_or(trimmed);

        if let Ok(addr) = addr_str.parse::<SocketAddr>() {
            return Ok(Self(addr));
        }
        if let Ok(ip) = addr_str.parse::<IpAddr>() {
            return Ok(Self(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }
        if let Some(ip) = addr_str
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .and_then(|inner| inner.parse::<IpAddr>().ok())
        {
            return Ok(Self(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }

        Err(DomainError::InvalidServerAddress(format!(
            "'{}' is not an IP address or IP:port",
            s
        )))
    }
}

impl TryFrom<String> for DnsServerAddr {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DnsServerAddr> for String {
    fn from(addr: DnsServerAddr) -> Self {
        addr.to_string()
    }
}
