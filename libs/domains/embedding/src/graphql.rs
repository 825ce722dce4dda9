//! GraphQL adapter: a `health` query and `embed`/`embedBatch` mutations.
//!
//! Failures never change the transport status. They surface as entries in
//! the response `errors` array with `extensions.code` set to
//! `INVALID_ARGUMENT` or `INTERNAL`, and the failed field resolves to null.

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, InputObject, Object, Schema, SimpleObject,
    http::GraphiQLSource,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    middleware,
    response::{Html, IntoResponse},
    routing::get,
};
use observability::{HttpMetricsState, MetricsRegistry, Protocol, track_http_metrics};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{BatchEmbedding, Embedding, HealthStatus, wire_int};
use crate::service::{EmbeddingContract, health};

pub const GRAPHQL_PATH: &str = "/graphql";

pub type EmbeddingSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Per-schema data shared by every resolver.
#[derive(Clone)]
pub struct GraphqlContext {
    pub contract: Arc<dyn EmbeddingContract>,
    pub metrics: Arc<MetricsRegistry>,
}

impl GraphqlContext {
    fn record(&self, operation: &str, field: &str, status: &str, start: Instant) {
        self.metrics
            .record_request(Protocol::Graphql, operation, field, status);
        self.metrics.record_latency(
            Protocol::Graphql,
            operation,
            field,
            start.elapsed().as_secs_f64(),
        );
    }

    fn observe<T>(
        &self,
        field: &str,
        start: Instant,
        result: EmbeddingResult<T>,
        inference_time_ms: impl Fn(&T) -> f64,
    ) -> async_graphql::Result<T> {
        match result {
            Ok(value) => {
                self.metrics.record_inference_latency(
                    Protocol::Graphql,
                    field,
                    inference_time_ms(&value) / 1000.0,
                );
                self.record("mutation", field, "OK", start);
                Ok(value)
            }
            Err(err) => {
                self.record("mutation", field, err.status_code(), start);
                Err(err.extend())
            }
        }
    }
}

impl ErrorExtensions for EmbeddingError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, e| e.set("code", self.status_code()))
    }
}

// ===== Schema types =====

#[derive(Debug, Clone, SimpleObject)]
pub struct HealthCheck {
    pub status: String,
    pub model: String,
    pub embedding_dimension: i32,
}

impl From<HealthStatus> for HealthCheck {
    fn from(h: HealthStatus) -> Self {
        Self {
            status: h.status,
            model: h.model,
            embedding_dimension: wire_int(h.embedding_dimension),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct EmbedResult {
    pub embedding: Vec<f64>,
    pub dimension: i32,
    pub inference_time_ms: f64,
}

impl From<Embedding> for EmbedResult {
    fn from(e: Embedding) -> Self {
        Self {
            embedding: e.vector,
            dimension: wire_int(e.dimension),
            inference_time_ms: e.inference_time_ms,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct BatchEmbedResult {
    pub embeddings: Vec<Vec<f64>>,
    pub count: i32,
    pub dimension: i32,
    pub inference_time_ms: f64,
}

impl From<BatchEmbedding> for BatchEmbedResult {
    fn from(b: BatchEmbedding) -> Self {
        Self {
            embeddings: b.vectors,
            count: wire_int(b.count),
            dimension: wire_int(b.dimension),
            inference_time_ms: b.inference_time_ms,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct EmbedInput {
    pub text: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct BatchEmbedInput {
    pub texts: Vec<String>,
}

// ===== Resolvers =====

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Model name and embedding dimension.
    async fn health(&self, ctx: &Context<'_>) -> async_graphql::Result<HealthCheck> {
        let start = Instant::now();
        let state = ctx.data::<GraphqlContext>()?;
        let status = health(state.contract.as_ref());
        state.record("query", "health", "OK", start);
        Ok(status.into())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Embed a single non-empty text.
    async fn embed(
        &self,
        ctx: &Context<'_>,
        input: EmbedInput,
    ) -> async_graphql::Result<Option<EmbedResult>> {
        let start = Instant::now();
        let state = ctx.data::<GraphqlContext>()?;
        let result = state.contract.embed(&input.text).await;
        let embedding = state.observe("embed", start, result, |e| e.inference_time_ms)?;
        Ok(Some(embedding.into()))
    }

    /// Embed a non-empty list of texts, preserving order.
    async fn embed_batch(
        &self,
        ctx: &Context<'_>,
        input: BatchEmbedInput,
    ) -> async_graphql::Result<Option<BatchEmbedResult>> {
        let start = Instant::now();
        let state = ctx.data::<GraphqlContext>()?;
        let result = state.contract.embed_batch(input.texts).await;
        let batch = state.observe("embedBatch", start, result, |b| b.inference_time_ms)?;
        Ok(Some(batch.into()))
    }
}

pub fn build_schema(
    contract: Arc<dyn EmbeddingContract>,
    metrics: Arc<MetricsRegistry>,
) -> EmbeddingSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(GraphqlContext { contract, metrics })
        .finish()
}

// ===== HTTP =====

pub async fn graphql_handler(
    State(schema): State<EmbeddingSchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// `POST /graphql` executes, `GET /graphql` serves GraphiQL.
pub fn graphql_router(schema: EmbeddingSchema, metrics: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .with_state(schema)
        .route_layer(middleware::from_fn_with_state(
            HttpMetricsState::new(metrics, Protocol::Graphql),
            track_http_metrics,
        ))
}
