#![allow(dead_code)]
#![allow(unused_imports)]

mod dns_server_mock;

pub use buffers::SharedBuffer;
pub use dns_server_mock::{MockAnswer, MockBehavior, MockTcpDnsServer, MockZone};
