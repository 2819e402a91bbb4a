use std::net::SocketAddr;
use std::path::PathBuf;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// ── Admission metrics ───────────────────────────────────────────

/// Counter: reservation decisions. Labels: status (`ok`/`fail`), reason.
pub const RESERVATIONS_TOTAL: &str = "storepick_reservations_total";

/// Counter: requests seen by the processor.
pub const REQUESTS_TOTAL: &str = "storepick_requests_total";

/// Histogram: wall time to process one batch, in seconds.
pub const BATCH_DURATION_SECONDS: &str = "storepick_batch_duration_seconds";

/// Gauge: stores in the loaded catalog.
pub const STORES_LOADED: &str = "storepick_stores_loaded";

/// Where recorded metrics end up for this run.
pub enum MetricsSink {
    /// No recorder installed; the `metrics` macros are no-ops.
    Disabled,
    /// Scrape endpoint served for as long as the process lives.
    Http(SocketAddr),
    /// Rendered once at the end of the run (textfile-collector style).
    File {
        path: PathBuf,
        handle: PrometheusHandle,
    },
}

impl MetricsSink {
    /// Write the final rendering for file sinks. Other sinks need nothing.
    pub async fn flush(&self) -> std::io::Result<()> {
        if let MetricsSink::File { path, handle } = self {
            tokio::fs::write(path, handle.render()).await?;
            tracing::info!("metrics written to {}", path.display());
        }
        Ok(())
    }
}

/// Install the Prometheus recorder. A port takes precedence over a file.
/// Must be called from within a tokio runtime when a port is given.
pub fn init(port: Option<u16>, file: Option<PathBuf>) -> Result<MetricsSink, BuildError> {
    if let Some(port) = port {
        let addr: SocketAddr = ([0, 0, 0, 0], port).into();
        PrometheusBuilder::new().with_http_listener(addr).install()?;
        tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
        return Ok(MetricsSink::Http(addr));
    }
    if let Some(path) = file {
        let handle = PrometheusBuilder::new().install_recorder()?;
        return Ok(MetricsSink::File { path, handle });
    }
    Ok(MetricsSink::Disabled)
}
