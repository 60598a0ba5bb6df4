use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tcpdns_application::ports::RecordSink;
use tcpdns_domain::{DomainError, ResolvedRecord};

/// In-memory sink that keeps every line it was handed.
#[derive(Clone, Default)]
pub struct CapturingSink {
    lines: Arc<Mutex<Vec<String>>>,
    diagnostics: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
    close_calls: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn sorted_lines(&self) -> Vec<String> {
        let mut lines = self.lines();
        lines.sort();
        lines
    }

    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl RecordSink for CapturingSink {
    fn write_record(&self, record: &ResolvedRecord) -> Result<(), DomainError> {
        if self.is_closed() {
            return Err(DomainError::Io("sink closed".to_string()));
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Io("broken pipe".to_string()));
        }
        self.lines.lock().unwrap().push(record.to_string());
        Ok(())
    }

    fn write_diagnostic(&self, message: &str) -> Result<(), DomainError> {
        if self.is_closed() {
            return Err(DomainError::Io("sink closed".to_string()));
        }
        self.diagnostics.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn close(&self) -> Result<(), DomainError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
