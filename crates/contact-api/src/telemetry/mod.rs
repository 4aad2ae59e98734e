//! Telemetry for the contact service
//!
//! - `metrics`: Prometheus counters and histograms served at `/metrics`
//! - [`init_tracing`]: global `tracing` subscriber setup

pub mod metrics;

pub use metrics::{ContactMetrics, SubmissionOutcome};

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("Failed to encode metrics: {0}")]
    EncodingError(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberError(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Install the global subscriber
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. `json` selects JSON
/// lines; otherwise compact human-readable output.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberError(e.to_string()))
}
