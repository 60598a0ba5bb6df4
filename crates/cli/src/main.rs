use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tcpdns_application::use_cases::{ResolveBatchUseCase, ResolveHostnameUseCase};
use tcpdns_domain::{CliOverrides, DnsServerAddr};
use tcpdns_infrastructure::dns::TcpDnsForwarder;
use tcpdns_infrastructure::input::HostnameFileReader;
use tracing::{info, warn};

mod bootstrap;

#[derive(Parser)]
#[command(name = "tcpdns")]
#[command(version = "0.1.0")]
#[command(about = "Resolve a list of hostnames over DNS-over-TCP")]
struct Cli {
    /// File with one hostname per line
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Number of concurrent workers
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// DNS server (ip, ip:port or [ipv6]:port)
    #[arg(short = 'n', long, value_name = "ADDR")]
    dns_server: Option<DnsServerAddr>,

    /// Per-query timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<f64>,

    /// Print failures and empty answers to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Also write result lines to this file
    #[arg(short = 'o', long, value_name = "PATH")]
    output_file: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_server: cli.dns_server,
        timeout_secs: cli.timeout,
        workers: cli.threads,
        verbose: cli.verbose,
        output_file: cli.output_file.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    let timeout = config.resolver.timeout()?;

    let batch = HostnameFileReader::read(&cli.input_file)
        .await
        .with_context(|| format!("Cannot read hostnames from {}", cli.input_file.display()))?;

    let sink = bootstrap::open_sink(&config)?;

    bootstrap::init_logging(&config, &sink);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        server = %config.resolver.server,
        workers = config.resolver.workers,
        timeout_ms = timeout.as_millis() as u64,
        hostnames = batch.len(),
        "Configuration loaded"
    );

    let resolver = Arc::new(ResolveHostnameUseCase::new(
        Arc::new(TcpDnsForwarder::new()),
        config.resolver.server,
        timeout,
    ));

    let report = ResolveBatchUseCase::new(resolver, config.resolver.workers, config.output.verbose)
        .execute(&batch, sink)
        .await
        .context("Batch resolution failed")?;

    if report.aborted_workers > 0 {
        warn!(
            aborted_workers = report.aborted_workers,
            "Some workers stopped early; their hostnames may be incomplete"
        );
    }

    info!(
        hostnames = report.totals.hostnames,
        resolved = report.totals.resolved,
        failed = report.totals.failed,
        records = report.totals.records,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Batch complete"
    );

    Ok(())
}
