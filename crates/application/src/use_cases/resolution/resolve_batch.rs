use super::resolve_hostname::ResolveHostnameUseCase;
use super::resolve_partition::{PartitionReport, ResolvePartitionUseCase};
use crate::ports::RecordSink;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tcpdns_domain::{DomainError, HostnameBatch};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub workers: usize,
    /// Workers that panicked; their slices are only partly processed.
    pub aborted_workers: usize,
    pub totals: PartitionReport,
    pub elapsed: Duration,
}

/// Splits a batch across a fixed number of workers, runs them concurrently
/// and waits for all of them before closing the sink.
pub struct ResolveBatchUseCase {
    resolver: Arc<ResolveHostnameUseCase>,
    workers: usize,
    verbose: bool,
}

impl ResolveBatchUseCase {
    pub fn new(resolver: Arc<ResolveHostnameUseCase>, workers: usize, verbose: bool) -> Self {
        Self {
            resolver,
            workers,
            verbose,
        }
    }

    /// Runs the whole batch. The sink must already be open; it is closed here
    /// once every worker has finished, whatever happened inside them.
    pub async fn execute(
        &self,
        batch: &HostnameBatch,
        sink: Arc<dyn RecordSink>,
    ) -> Result<BatchReport, DomainError> {
        if self.workers == 0 {
            return Err(DomainError::InvalidWorkerCount(self.workers));
        }

        let start = Instant::now();
        let slices = batch.partitions(self.workers);

        info!(
            hostnames = batch.len(),
            workers = self.workers,
            server = %self.resolver.server(),
            timeout_ms = self.resolver.timeout().as_millis() as u64,
            "Starting batch resolution"
        );

        let handles = slices
            .into_iter()
            .enumerate()
            .map(|(index, slice)| {
                let hostnames = slice.to_vec();
                let worker = ResolvePartitionUseCase::new(
                    Arc::clone(&self.resolver),
                    Arc::clone(&sink),
                    self.verbose,
                );
                tokio::spawn(async move {
                    debug!(worker = index, hostnames = hostnames.len(), "Worker started");
                    let report = worker.execute(&hostnames).await;
                    debug!(worker = index, records = report.records, "Worker finished");
                    report
                })
            })
            .collect::<Vec<_>>();

        let mut report = BatchReport {
            workers: self.workers,
            ..BatchReport::default()
        };

        for (index, joined) in join_all(handles).await.into_iter().enumerate() {
            match joined {
                Ok(partition) => report.totals.merge(partition),
                Err(e) => {
                    error!(worker = index, error = %e, "Worker terminated abnormally");
                    report.aborted_workers += 1;
                }
            }
        }

        sink.close()?;
        report.elapsed = start.elapsed();

        Ok(report)
    }
}
