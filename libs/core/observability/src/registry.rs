//! Process-scoped Prometheus registry shared by every protocol adapter.
//!
//! The recorder is not installed as the global `metrics` recorder. Each
//! process root owns one [`MetricsRegistry`] and hands it to its adapters as
//! `Arc<MetricsRegistry>`.
//!
//! Increments are atomic and [`MetricsRegistry::export`] walks the exporter's
//! sharded storage without a registry-wide lock. A scrape may observe a
//! partially updated set.

use metrics::{Key, KeyName, Label, Level, Metadata, Recorder, SharedString, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use crate::labels::{Protocol, sanitize_label};

/// Requests handled, by protocol, method, endpoint and outcome.
pub const REQUESTS_TOTAL: &str = "embedding_requests_total";
/// End-to-end handling latency inside the adapter.
pub const REQUEST_DURATION_SECONDS: &str = "embedding_request_duration_seconds";
/// Time spent inside the embedding model only.
pub const INFERENCE_DURATION_SECONDS: &str = "embedding_inference_duration_seconds";
/// Transport-level HTTP requests (all routes, including health and metrics).
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// Transport-level HTTP latency.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Latency buckets in seconds: 1ms up to 10s.
pub const DEFAULT_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5,
    10.0,
];

pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry").finish_non_exhaustive()
    }
}

impl MetricsRegistry {
    /// Registry with [`DEFAULT_LATENCY_BUCKETS`].
    pub fn new() -> Result<Self, BuildError> {
        Self::with_buckets(DEFAULT_LATENCY_BUCKETS)
    }

    pub fn with_buckets(buckets: &[f64]) -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets(buckets)?
            .build_recorder();
        let handle = recorder.handle();

        let registry = Self { recorder, handle };
        registry.describe();
        Ok(registry)
    }

    /// Count one handled request. Never fails; odd label values are sanitized.
    pub fn record_request(&self, protocol: Protocol, method: &str, endpoint: &str, status: &str) {
        let key = Key::from_parts(
            REQUESTS_TOTAL,
            vec![
                Label::new("protocol", protocol.as_str()),
                Label::new("method", sanitize_label(method)),
                Label::new("endpoint", sanitize_label(endpoint)),
                Label::new("status", sanitize_label(status)),
            ],
        );
        self.recorder
            .register_counter(&key, &metadata())
            .increment(1);
    }

    /// Observe full request-handling latency.
    pub fn record_latency(&self, protocol: Protocol, method: &str, endpoint: &str, seconds: f64) {
        let key = Key::from_parts(
            REQUEST_DURATION_SECONDS,
            vec![
                Label::new("protocol", protocol.as_str()),
                Label::new("method", sanitize_label(method)),
                Label::new("endpoint", sanitize_label(endpoint)),
            ],
        );
        self.recorder
            .register_histogram(&key, &metadata())
            .record(clamp_seconds(seconds));
    }

    /// Observe model-only latency.
    pub fn record_inference_latency(&self, protocol: Protocol, method: &str, seconds: f64) {
        let key = Key::from_parts(
            INFERENCE_DURATION_SECONDS,
            vec![
                Label::new("protocol", protocol.as_str()),
                Label::new("method", sanitize_label(method)),
            ],
        );
        self.recorder
            .register_histogram(&key, &metadata())
            .record(clamp_seconds(seconds));
    }

    /// Transport-level request accounting used by the HTTP middleware.
    pub fn record_http(
        &self,
        protocol: Protocol,
        method: &str,
        path: &str,
        status: u16,
        seconds: f64,
    ) {
        let method = sanitize_label(method);
        let path = sanitize_label(path);

        let counter_key = Key::from_parts(
            HTTP_REQUESTS_TOTAL,
            vec![
                Label::new("protocol", protocol.as_str()),
                Label::new("method", method.clone()),
                Label::new("path", path.clone()),
                Label::new("status", status.to_string()),
            ],
        );
        self.recorder
            .register_counter(&counter_key, &metadata())
            .increment(1);

        let histogram_key = Key::from_parts(
            HTTP_REQUEST_DURATION_SECONDS,
            vec![
                Label::new("protocol", protocol.as_str()),
                Label::new("method", method),
                Label::new("path", path),
            ],
        );
        self.recorder
            .register_histogram(&histogram_key, &metadata())
            .record(clamp_seconds(seconds));
    }

    /// Render the current snapshot in the Prometheus text exposition format.
    pub fn export(&self) -> String {
        self.handle.render()
    }

    /// Drain histogram buffers and expire idle series. Cheap; run periodically.
    pub fn run_upkeep(&self) {
        self.handle.run_upkeep();
    }

    fn describe(&self) {
        self.recorder.describe_counter(
            KeyName::from(REQUESTS_TOTAL),
            Some(Unit::Count),
            SharedString::from("Total number of embedding API requests"),
        );
        self.recorder.describe_histogram(
            KeyName::from(REQUEST_DURATION_SECONDS),
            Some(Unit::Seconds),
            SharedString::from("Request latency in seconds"),
        );
        self.recorder.describe_histogram(
            KeyName::from(INFERENCE_DURATION_SECONDS),
            Some(Unit::Seconds),
            SharedString::from("Model inference latency in seconds"),
        );
        self.recorder.describe_counter(
            KeyName::from(HTTP_REQUESTS_TOTAL),
            Some(Unit::Count),
            SharedString::from("Total number of HTTP requests"),
        );
        self.recorder.describe_histogram(
            KeyName::from(HTTP_REQUEST_DURATION_SECONDS),
            Some(Unit::Seconds),
            SharedString::from("HTTP request duration in seconds"),
        );
    }
}

fn metadata() -> Metadata<'static> {
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()))
}

fn clamp_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
