//! tcpdns infrastructure: DNS-over-TCP codec and transport, output sink and
//! hostname file input.
pub mod dns;
pub mod input;
pub mod output;
