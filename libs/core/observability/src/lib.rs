//! Observability utilities for the embedding gateway.
//!
//! This crate provides:
//! - A process-scoped Prometheus [`MetricsRegistry`] shared by the REST, gRPC
//!   and GraphQL adapters
//! - Axum middleware for transport-level HTTP request metrics
//! - A `/metrics` handler and a periodic upkeep task
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use observability::{MetricsRegistry, Protocol, metrics_router};
//!
//! let registry = Arc::new(MetricsRegistry::new()?);
//! registry.record_request(Protocol::Rest, "POST", "/embed", "200");
//!
//! let app = Router::new().merge(metrics_router(registry.clone()));
//! ```

pub mod labels;
pub mod middleware;
pub mod registry;
pub mod snapshot;

pub use labels::{Protocol, sanitize_label};
pub use middleware::{HttpMetricsState, track_http_metrics};
pub use registry::MetricsRegistry;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use tokio::task::JoinHandle;
use tracing::debug;

/// Interval between histogram upkeep passes.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Axum handler for the /metrics endpoint
pub async fn metrics_handler(State(registry): State<Arc<MetricsRegistry>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        registry.export(),
    )
}

/// Router exposing `GET /metrics` for the given registry.
pub fn metrics_router<S>(registry: Arc<MetricsRegistry>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(registry)
}

/// Run [`MetricsRegistry::run_upkeep`] every [`UPKEEP_INTERVAL`] until the
/// returned task is aborted or the runtime shuts down.
pub fn spawn_upkeep(registry: Arc<MetricsRegistry>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            registry.run_upkeep();
            debug!("Metrics upkeep completed");
        }
    })
}
