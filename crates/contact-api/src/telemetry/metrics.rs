//! Prometheus metrics for contact submissions
//!
//! - `contact_submissions_total` (counter) - submissions by outcome
//! - `contact_submission_duration_seconds` (histogram) - end-to-end handling time

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

use super::{Result, TelemetryError};

/// Outcome label for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Created,
    Invalid,
    Error,
}

impl SubmissionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionOutcome::Created => "created",
            SubmissionOutcome::Invalid => "invalid",
            SubmissionOutcome::Error => "error",
        }
    }
}

/// Submission metrics with their own registry
pub struct ContactMetrics {
    registry: Registry,
    submissions_total: IntCounterVec,
    duration_seconds: Histogram,
}

impl ContactMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let submissions_total = IntCounterVec::new(
            Opts::new("submissions_total", "Contact form submissions by outcome")
                .namespace("contact"),
            &["result"],
        )?;

        let duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "submission_duration_seconds",
                "Time to validate and persist a contact submission",
            )
            .namespace("contact")
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 30.0]),
        )?;

        registry.register(Box::new(submissions_total.clone()))?;
        registry.register(Box::new(duration_seconds.clone()))?;

        Ok(Self {
            registry,
            submissions_total,
            duration_seconds,
        })
    }

    /// Count one submission and record how long it took
    pub fn record(&self, outcome: SubmissionOutcome, seconds: f64) {
        self.submissions_total
            .with_label_values(&[outcome.as_str()])
            .inc();
        self.duration_seconds.observe(seconds);
    }

    /// Current count for an outcome
    pub fn submissions(&self, outcome: SubmissionOutcome) -> u64 {
        self.submissions_total
            .with_label_values(&[outcome.as_str()])
            .get()
    }

    /// Prometheus text exposition
    pub fn encode_text(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::EncodingError(e.to_string()))
    }
}
