use std::sync::Arc;
use tcpdns_domain::Config;
use tcpdns_infrastructure::output::OutputSink;
use tracing::debug;

/// Log events share the sink's diagnostic stream and lock, so they never
/// split a diagnostic line and stdout carries nothing but result lines.
pub fn init_logging(config: &Config, sink: &Arc<OutputSink>) {
    let log_level = config.logging.level.parse().unwrap_or(tracing::Level::WARN);
    let sink = Arc::clone(sink);

    tracing_subscriber::fmt()
        .with_writer(move || sink.log_writer())
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_max_level(log_level)
        .with_ansi(false)
        .init();

    debug!("Logging initialized at level: {}", config.logging.level);
}
