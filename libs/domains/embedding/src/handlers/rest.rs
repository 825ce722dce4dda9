//! REST handlers for the embedding contract

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, InternalServerErrorResponse, UnprocessableEntityResponse,
};
use core_config::AppInfo;
use observability::{MetricsRegistry, Protocol};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

use crate::error::RestErrorMode;
use crate::models::{BatchEmbedding, Embedding, HealthStatus};
use crate::service::{EmbeddingContract, health};

pub const HEALTH_PATH: &str = "/health";
pub const EMBED_PATH: &str = "/embed";
pub const BATCH_EMBED_PATH: &str = "/embed/batch";
pub const METRICS_PATH: &str = "/metrics";

/// Shared state for every REST handler.
#[derive(Clone)]
pub struct RestState {
    pub contract: Arc<dyn EmbeddingContract>,
    pub metrics: Arc<MetricsRegistry>,
    pub error_mode: RestErrorMode,
    pub app: AppInfo,
}

impl RestState {
    pub fn new(
        contract: Arc<dyn EmbeddingContract>,
        metrics: Arc<MetricsRegistry>,
        error_mode: RestErrorMode,
        app: AppInfo,
    ) -> Self {
        Self {
            contract,
            metrics,
            error_mode,
            app,
        }
    }

    fn finish(&self, method: &str, endpoint: &str, start: Instant, response: Response) -> Response {
        self.metrics
            .record_request(Protocol::Rest, method, endpoint, response.status().as_str());
        self.metrics.record_latency(
            Protocol::Rest,
            method,
            endpoint,
            start.elapsed().as_secs_f64(),
        );
        response
    }

    fn record_inference(&self, endpoint: &str, inference_time_ms: f64) {
        self.metrics
            .record_inference_latency(Protocol::Rest, endpoint, inference_time_ms / 1000.0);
    }
}

// ===== Request/Response DTOs =====

/// Request to embed a single text
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbedRequest {
    /// Text to embed; must not be empty
    #[schema(example = "hello world")]
    pub text: String,
}

/// Embedding for a single text
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbedResponse {
    pub embedding: Vec<f64>,
    #[schema(example = 384)]
    pub dimension: usize,
    /// Model-only inference time in milliseconds
    pub inference_time_ms: f64,
}

impl From<Embedding> for EmbedResponse {
    fn from(e: Embedding) -> Self {
        Self {
            embedding: e.vector,
            dimension: e.dimension,
            inference_time_ms: e.inference_time_ms,
        }
    }
}

/// Request to embed several texts at once
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchEmbedRequest {
    /// Texts to embed; the list must not be empty
    pub texts: Vec<String>,
}

/// Embeddings for a batch, in request order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchEmbedResponse {
    pub embeddings: Vec<Vec<f64>>,
    #[schema(example = 3)]
    pub count: usize,
    #[schema(example = 384)]
    pub dimension: usize,
    pub inference_time_ms: f64,
}

impl From<BatchEmbedding> for BatchEmbedResponse {
    fn from(b: BatchEmbedding) -> Self {
        Self {
            embeddings: b.vectors,
            count: b.count,
            dimension: b.dimension,
            inference_time_ms: b.inference_time_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "all-MiniLM-L6-v2")]
    pub model: String,
    #[schema(example = 384)]
    pub embedding_dimension: usize,
}

impl From<HealthStatus> for HealthResponse {
    fn from(h: HealthStatus) -> Self {
        Self {
            status: h.status,
            model: h.model,
            embedding_dimension: h.embedding_dimension,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestEndpoints {
    pub health: String,
    pub embed: String,
    pub batch_embed: String,
    pub metrics: String,
}

/// Static service descriptor served at `/`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestDescriptor {
    pub name: String,
    pub version: String,
    pub protocol: String,
    pub endpoints: RestEndpoints,
}

// ===== Handlers =====

/// Describe the API
#[utoipa::path(
    get,
    path = "/",
    tag = "embedding",
    responses(
        (status = 200, description = "Service descriptor", body = RestDescriptor)
    )
)]
pub async fn root(State(state): State<RestState>) -> Json<RestDescriptor> {
    Json(RestDescriptor {
        name: "Embedding REST API".to_string(),
        version: state.app.version.to_string(),
        protocol: "REST over HTTP/1.1 and HTTP/2".to_string(),
        endpoints: RestEndpoints {
            health: HEALTH_PATH.to_string(),
            embed: EMBED_PATH.to_string(),
            batch_embed: BATCH_EMBED_PATH.to_string(),
            metrics: METRICS_PATH.to_string(),
        },
    })
}

/// Report model name and dimension
#[utoipa::path(
    get,
    path = "/health",
    tag = "embedding",
    responses(
        (status = 200, description = "Model is loaded", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<RestState>) -> Response {
    let start = Instant::now();
    let response = Json(HealthResponse::from(health(state.contract.as_ref()))).into_response();
    state.finish("GET", HEALTH_PATH, start, response)
}

/// Embed a single text
#[utoipa::path(
    post,
    path = "/embed",
    tag = "embedding",
    request_body = EmbedRequest,
    responses(
        (status = 200, description = "Embedding generated", body = EmbedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn embed(
    State(state): State<RestState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let result = match payload {
        Ok(Json(request)) => state
            .contract
            .embed(&request.text)
            .await
            .map_err(|e| state.error_mode.to_app_error(e)),
        Err(rejection) => Err(AppError::from(rejection)),
    };

    let response = match result {
        Ok(embedding) => {
            state.record_inference(EMBED_PATH, embedding.inference_time_ms);
            Json(EmbedResponse::from(embedding)).into_response()
        }
        Err(err) => err.into_response(),
    };
    state.finish("POST", EMBED_PATH, start, response)
}

/// Embed a batch of texts
#[utoipa::path(
    post,
    path = "/embed/batch",
    tag = "embedding",
    request_body = BatchEmbedRequest,
    responses(
        (status = 200, description = "Embeddings generated in request order", body = BatchEmbedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn embed_batch(
    State(state): State<RestState>,
    payload: Result<Json<BatchEmbedRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let result = match payload {
        Ok(Json(request)) => state
            .contract
            .embed_batch(request.texts)
            .await
            .map_err(|e| state.error_mode.to_app_error(e)),
        Err(rejection) => Err(AppError::from(rejection)),
    };

    let response = match result {
        Ok(batch) => {
            state.record_inference(BATCH_EMBED_PATH, batch.inference_time_ms);
            Json(BatchEmbedResponse::from(batch)).into_response()
        }
        Err(err) => err.into_response(),
    };
    state.finish("POST", BATCH_EMBED_PATH, start, response)
}
