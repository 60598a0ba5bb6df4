pub mod resolution;

pub use resolution::{
    BatchReport, HostnameResolution, PartitionReport, ResolveBatchUseCase,
    ResolveHostnameUseCase, ResolvePartitionUseCase,
};
