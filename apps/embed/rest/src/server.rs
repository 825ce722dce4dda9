//! REST server initialization and lifecycle management
//!
//! - Model load (fatal on failure, before the listener is bound)
//! - Metrics registry and upkeep task
//! - Router composition: embedding routes, `/metrics`, OpenAPI docs
//! - Graceful shutdown on SIGINT/SIGTERM

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use axum_helpers::server::{create_app, create_router};
use domain_embedding::{
    EmbeddingContract, EmbeddingService, InferencePool, RestApiDoc, RestState, load_model,
    rest_router,
};
use eyre::{Result, WrapErr};
use observability::{MetricsRegistry, spawn_upkeep};
use tracing::info;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::config::Config;

/// Compose the full application router around a ready contract.
pub fn build_app(state: RestState) -> Router {
    let docs = Router::new()
        .route("/openapi.json", get(|| async { Json(RestApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", RestApiDoc::openapi()));

    create_router(rest_router(state).merge(docs))
}

/// Run the REST server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, the metrics registry
/// cannot be built, or the listener fails.
pub async fn run(config: Config) -> Result<()> {
    let model = load_model(&config.model).wrap_err("Failed to load embedding model")?;
    let contract: Arc<dyn EmbeddingContract> = Arc::new(EmbeddingService::new(
        model,
        InferencePool::new(config.inference_workers),
    ));

    let metrics = Arc::new(MetricsRegistry::new().wrap_err("Failed to build metrics registry")?);
    let upkeep = spawn_upkeep(metrics.clone());

    info!(
        error_mode = ?config.error_mode,
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    let state = RestState::new(contract, metrics, config.error_mode, config.app);
    let result = create_app(build_app(state), &config.server)
        .await
        .wrap_err("REST server failed");

    upkeep.abort();
    info!("REST server shutdown complete");
    result
}
