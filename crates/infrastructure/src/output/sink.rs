use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tcpdns_application::ports::RecordSink;
use tcpdns_domain::{DomainError, ResolvedRecord};
use tracing::{debug, warn};

type Writer = Box<dyn Write + Send>;

struct Writers {
    console: Writer,
    file: Option<Writer>,
    diagnostics: Writer,
}

impl Writers {
    fn flush_all(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        self.diagnostics.flush()
    }
}

/// Console output with an optional file echo, plus the diagnostic stream.
///
/// One mutex guards all three writers: a result line reaches stdout and the
/// file under the same lock acquisition, so the two never diverge and no
/// other worker's line can land in between.
pub struct OutputSink {
    writers: Mutex<Option<Writers>>,
}

impl OutputSink {
    /// Opens stdout/stderr and, when `path` is given, creates (truncates)
    /// the output file.
    pub fn open(path: Option<&Path>) -> Result<Self, DomainError> {
        let file = match path {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    DomainError::Io(format!(
                        "Failed to create output file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                debug!(path = %path.display(), "Output file opened");
                Some(Box::new(LineWriter::new(file)) as Writer)
            }
            None => None,
        };

        Ok(Self::from_writers(
            Box::new(io::stdout()),
            file,
            Box::new(io::stderr()),
        ))
    }

    pub fn from_writers(console: Writer, file: Option<Writer>, diagnostics: Writer) -> Self {
        Self {
            writers: Mutex::new(Some(Writers {
                console,
                file,
                diagnostics,
            })),
        }
    }

    /// Writer for log events that shares the diagnostic stream and its lock,
    /// so a log line never lands inside another line. Falls back to stderr
    /// once the sink is closed.
    pub fn log_writer(self: &Arc<Self>) -> LogWriter {
        LogWriter {
            sink: Arc::clone(self),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    // Lock even if a previous holder panicked mid-write.
    fn lock(&self) -> MutexGuard<'_, Option<Writers>> {
        self.writers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct LogWriter {
    sink: Arc<OutputSink>,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.sink.lock();
        match guard.as_mut() {
            Some(writers) => writers.diagnostics.write_all(buf)?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.sink.lock().as_mut() {
            Some(writers) => writers.diagnostics.flush(),
            None => io::stderr().flush(),
        }
    }
}

fn closed_error() -> DomainError {
    DomainError::Io("Output sink is closed".to_string())
}

impl RecordSink for OutputSink {
    fn write_record(&self, record: &ResolvedRecord) -> Result<(), DomainError> {
        let line = format!("{}\n", record);

        let mut guard = self.lock();
        let writers = guard.as_mut().ok_or_else(closed_error)?;

        writers
            .console
            .write_all(line.as_bytes())
            .map_err(|e| DomainError::Io(format!("Failed to write to stdout: {}", e)))?;
        if let Some(file) = writers.file.as_mut() {
            file.write_all(line.as_bytes())
                .map_err(|e| DomainError::Io(format!("Failed to write to output file: {}", e)))?;
        }

        Ok(())
    }

    fn write_diagnostic(&self, message: &str) -> Result<(), DomainError> {
        let line = format!("{}\n", message);

        let mut guard = self.lock();
        let writers = guard.as_mut().ok_or_else(closed_error)?;

        writers
            .diagnostics
            .write_all(line.as_bytes())
            .map_err(|e| DomainError::Io(format!("Failed to write to stderr: {}", e)))
    }

    fn close(&self) -> Result<(), DomainError> {
        let Some(mut writers) = self.lock().take() else {
            return Ok(());
        };

        writers
            .flush_all()
            .map_err(|e| DomainError::Io(format!("Failed to flush output: {}", e)))
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        let writers = self.lock().take();
        if let Some(mut writers) = writers {
            if let Err(e) = writers.flush_all() {
                warn!(error = %e, "Failed to flush output on drop");
            }
        }
    }
}
