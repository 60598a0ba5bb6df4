use super::resolve_hostname::{HostnameResolution, ResolveHostnameUseCase};
use crate::ports::RecordSink;
use crate::services::RecordClassifier;
use std::sync::Arc;
use tcpdns_domain::QueryOutcome;
use tracing::{debug, warn};

/// Counters for one worker's slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionReport {
    pub hostnames: usize,
    pub resolved: usize,
    pub failed: usize,
    pub records: usize,
}

impl PartitionReport {
    pub fn merge(&mut self, other: PartitionReport) {
        self.hostnames += other.hostnames;
        self.resolved += other.resolved;
        self.failed += other.failed;
        self.records += other.records;
    }
}

/// One worker: resolves its hostnames one after another and writes every
/// record to the shared sink.
pub struct ResolvePartitionUseCase {
    resolver: Arc<ResolveHostnameUseCase>,
    sink: Arc<dyn RecordSink>,
    verbose: bool,
}

impl ResolvePartitionUseCase {
    pub fn new(
        resolver: Arc<ResolveHostnameUseCase>,
        sink: Arc<dyn RecordSink>,
        verbose: bool,
    ) -> Self {
        Self {
            resolver,
            sink,
            verbose,
        }
    }

    pub async fn execute(&self, hostnames: &[String]) -> PartitionReport {
        let mut report = PartitionReport::default();

        for raw in hostnames {
            let hostname = raw.trim();
            if hostname.is_empty() {
                debug!("Skipping blank hostname");
                continue;
            }

            report.hostnames += 1;
            let resolution = self.resolver.execute(hostname).await;

            if let Some(failure) = resolution.failure() {
                report.failed += 1;
                self.report_failure(&resolution, failure);
                continue;
            }

            report.resolved += 1;
            report.records += self.emit_records(&resolution);
        }

        report
    }

    fn emit_records(&self, resolution: &HostnameResolution) -> usize {
        let mut written = 0;

        for (_, response) in resolution.responses() {
            let classification = RecordClassifier::classify(&resolution.hostname, response);

            for record in &classification.records {
                match self.sink.write_record(record) {
                    Ok(()) => written += 1,
                    Err(e) => warn!(
                        hostname = %resolution.hostname,
                        error = %e,
                        "Failed to write record"
                    ),
                }
            }

            for _ in 0..classification.empty_sets {
                self.diagnostic(&format!("No records found for {}", resolution.hostname));
            }
        }

        written
    }

    fn report_failure(&self, resolution: &HostnameResolution, failure: &QueryOutcome) {
        let hostname = &resolution.hostname;
        match failure {
            QueryOutcome::Timeout => {
                self.diagnostic(&format!("Timeout occurred while resolving {}", hostname))
            }
            QueryOutcome::ProtocolError(message) => {
                self.diagnostic(&format!("Error resolving {}: {}", hostname, message))
            }
            QueryOutcome::Answered(_) => {}
        }
        self.diagnostic(&format!("Unable to resolve {}", hostname));
    }

    fn diagnostic(&self, message: &str) {
        if !self.verbose {
            return;
        }
        if let Err(e) = self.sink.write_diagnostic(message) {
            warn!(error = %e, "Failed to write diagnostic");
        }
    }
}
