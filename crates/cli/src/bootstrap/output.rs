use std::path::Path;
use std::sync::Arc;
use tcpdns_domain::Config;
use tcpdns_infrastructure::output::OutputSink;

pub fn open_sink(config: &Config) -> anyhow::Result<Arc<OutputSink>> {
    let path = config.output.file.as_deref().map(Path::new);

    let sink = OutputSink::open(path).map_err(|e| anyhow::anyhow!(e))?;

    Ok(Arc::new(sink))
}
