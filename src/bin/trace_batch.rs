//! trace-batch - resolve a CSV of tracking codes through the proxy
//!
//! Reads one identifier per line (an optional header line and extra columns
//! are ignored), queries the proxy one identifier at a time and writes the
//! results as CSV. Ctrl-C stops issuing lookups; results gathered so far are
//! still exported.

use anyhow::{Context, bail};
use btt_trace::config::Config;
use btt_trace::core::batch::{BatchProcessor, Progress, ProgressSink, ProxyClient, RunState};
use btt_trace::core::export::{default_export_filename, to_csv};
use btt_trace::core::types::{StatusClass, TraceResult};
use btt_trace::utils::logging::init_logging;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "trace-batch", version, about = "Resolve a CSV of BTT tracking codes")]
struct Cli {
    /// CSV file with one tracking code per line
    input: PathBuf,

    /// Base URL of the tracking proxy
    #[arg(long, env = "TRACE_PROXY_URL")]
    proxy: Option<String>,

    /// Where to write the results (defaults to tracking_results_<millis>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pause between lookups, in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,

    /// Maximum number of data lines
    #[arg(long)]
    max_lines: Option<usize>,

    /// Per-lookup request timeout, in seconds
    #[arg(long, default_value_t = ProxyClient::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

/// Logs each finished identifier
struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_progress(&self, progress: &Progress) {
        info!(
            "[{:>3}%] {}/{} {}",
            progress.percent(),
            progress.completed,
            progress.total,
            progress.current
        );
    }

    fn on_result(&self, result: &TraceResult) {
        match result.status_class() {
            StatusClass::Error => warn!(
                "#{} {}: {}",
                result.sequence_number,
                result.identifier,
                result.error_message().unwrap_or_default()
            ),
            class => info!(
                "#{} {}: {} ({:?})",
                result.sequence_number, result.identifier, result.status, class
            ),
        }
    }
}

fn check_input(path: &Path, max_bytes: u64) -> anyhow::Result<()> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        bail!("{} is not a .csv file", path.display());
    }

    let size = std::fs::metadata(path)
        .with_context(|| format!("cannot read {}", path.display()))?
        .len();
    if size > max_bytes {
        bail!(
            "{} is {} bytes; the limit is {} bytes",
            path.display(),
            size,
            max_bytes
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load().await.context("failed to load configuration")?;
    init_logging(config.logging());

    let mut batch = config.batch().clone();
    if let Some(pacing_ms) = cli.pacing_ms {
        batch = batch.with_pacing(Duration::from_millis(pacing_ms));
    }
    if let Some(max_lines) = cli.max_lines {
        batch = batch.with_max_lines(max_lines);
    }
    let proxy_url = cli.proxy.clone().unwrap_or_else(|| batch.proxy_url.clone());

    check_input(&cli.input, batch.max_file_bytes)?;
    let raw = tokio::fs::read_to_string(&cli.input)
        .await
        .with_context(|| format!("cannot read {}", cli.input.display()))?;

    let client = ProxyClient::new(&proxy_url, Duration::from_secs(cli.timeout_secs))?;
    info!("Using proxy endpoint {}", client.endpoint());

    let mut processor = BatchProcessor::new(Arc::new(client), batch);
    let run = processor.start(&raw)?;

    let cancel = run.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; finishing the current lookup and stopping");
            cancel.cancel();
        }
    });

    let outcome = run.run_to_end(&LogProgress).await;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(default_export_filename()));
    tokio::fs::write(&output, to_csv(&outcome.results))
        .await
        .with_context(|| format!("cannot write {}", output.display()))?;

    info!(
        "Wrote {} of {} results to {} ({} ok, {} failed)",
        outcome.results.len(),
        outcome.total,
        output.display(),
        outcome.succeeded(),
        outcome.failed()
    );

    if outcome.state == RunState::Aborted {
        bail!("batch run was interrupted");
    }

    Ok(())
}
