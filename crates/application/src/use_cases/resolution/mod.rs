mod resolve_batch;
mod resolve_hostname;
mod resolve_partition;

pub use resolve_batch::{BatchReport, ResolveBatchUseCase};
pub use resolve_hostname::{HostnameResolution, ResolveHostnameUseCase};
pub use resolve_partition::{PartitionReport, ResolvePartitionUseCase};
