use tcpdns_domain::{DomainError, ResolvedRecord};

/// Shared destination for result lines and diagnostics.
///
/// Every call writes one complete line while holding the sink's lock, so
/// lines from concurrent workers never interleave.
pub trait RecordSink: Send + Sync {
    /// Writes the record to the primary output and its file echo, if any.
    fn write_record(&self, record: &ResolvedRecord) -> Result<(), DomainError>;

    /// Writes a line to the diagnostic stream.
    fn write_diagnostic(&self, message: &str) -> Result<(), DomainError>;

    /// Flushes and releases the outputs. Later writes fail.
    fn close(&self) -> Result<(), DomainError>;
}
