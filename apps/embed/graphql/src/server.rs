//! GraphQL server initialization and lifecycle management

use std::sync::Arc;
use std::time::Instant;

use axum::{Json, Router, extract::State, middleware, routing::get};
use axum_helpers::server::{create_app, create_router};
use core_config::AppInfo;
use domain_embedding::{
    EmbeddingContract, EmbeddingService, InferencePool, build_schema, graphql::GRAPHQL_PATH,
    graphql_router, load_model, models::HEALTHY,
};
use eyre::{Result, WrapErr};
use observability::{
    HttpMetricsState, MetricsRegistry, Protocol, metrics_router, spawn_upkeep, track_http_metrics,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlEndpoints {
    pub graphql: String,
    pub graphiql: String,
    pub metrics: String,
}

/// Static service descriptor served at `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlDescriptor {
    pub name: String,
    pub version: String,
    pub protocol: String,
    pub endpoints: GraphqlEndpoints,
}

/// Process liveness, independent of the `health` query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liveness {
    pub status: String,
    pub api: String,
}

pub const LIVENESS_PATH: &str = "/health";

#[derive(Clone)]
struct MetaState {
    app: AppInfo,
    metrics: Arc<MetricsRegistry>,
}

async fn root(State(state): State<MetaState>) -> Json<GraphqlDescriptor> {
    Json(GraphqlDescriptor {
        name: "Embedding GraphQL API".to_string(),
        version: state.app.version.to_string(),
        protocol: "GraphQL over HTTP/1.1 and HTTP/2".to_string(),
        endpoints: GraphqlEndpoints {
            graphql: GRAPHQL_PATH.to_string(),
            graphiql: format!("{GRAPHQL_PATH} (browser)"),
            metrics: "/metrics".to_string(),
        },
    })
}

async fn liveness(State(state): State<MetaState>) -> Json<Liveness> {
    let start = Instant::now();
    let body = Json(Liveness {
        status: HEALTHY.to_string(),
        api: "graphql".to_string(),
    });
    state
        .metrics
        .record_request(Protocol::Graphql, "GET", LIVENESS_PATH, "200");
    state.metrics.record_latency(
        Protocol::Graphql,
        "GET",
        LIVENESS_PATH,
        start.elapsed().as_secs_f64(),
    );
    body
}

/// Compose the full application router around a ready contract.
pub fn build_app(
    contract: Arc<dyn EmbeddingContract>,
    metrics: Arc<MetricsRegistry>,
    app: AppInfo,
) -> Router {
    let schema = build_schema(contract, metrics.clone());

    let meta = Router::new()
        .route("/", get(root))
        .route(LIVENESS_PATH, get(liveness))
        .with_state(MetaState {
            app,
            metrics: metrics.clone(),
        })
        .route_layer(middleware::from_fn_with_state(
            HttpMetricsState::new(metrics.clone(), Protocol::Graphql),
            track_http_metrics,
        ));

    create_router(
        graphql_router(schema, metrics.clone())
            .merge(meta)
            .merge(metrics_router::<()>(metrics)),
    )
}

/// Run the GraphQL server until a shutdown signal arrives.
pub async fn run(config: Config) -> Result<()> {
    let model = load_model(&config.model).wrap_err("Failed to load embedding model")?;
    let contract: Arc<dyn EmbeddingContract> = Arc::new(EmbeddingService::new(
        model,
        InferencePool::new(config.inference_workers),
    ));

    let metrics = Arc::new(MetricsRegistry::new().wrap_err("Failed to build metrics registry")?);
    let upkeep = spawn_upkeep(metrics.clone());

    info!(
        "Starting {} v{} on {} (GraphiQL at {})",
        config.app.name,
        config.app.version,
        config.server.address(),
        GRAPHQL_PATH
    );

    let result = create_app(build_app(contract, metrics, config.app), &config.server)
        .await
        .wrap_err("GraphQL server failed");

    upkeep.abort();
    info!("GraphQL server shutdown complete");
    result
}
