use std::path::Path;
use tcpdns_domain::{DomainError, HostnameBatch};
use tracing::debug;

pub struct HostnameFileReader;

impl HostnameFileReader {
    /// Reads one hostname per line. Invalid UTF-8 is replaced rather than
    /// rejected so one bad line cannot sink the whole batch.
    pub async fn read(path: &Path) -> Result<HostnameBatch, DomainError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DomainError::Io(format!("Failed to read input file {}: {}", path.display(), e))
        })?;

        let batch = HostnameBatch::parse(&String::from_utf8_lossy(&bytes));
        debug!(path = %path.display(), hostnames = batch.len(), "Hostname file loaded");

        Ok(batch)
    }
}
