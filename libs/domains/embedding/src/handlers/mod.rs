pub mod rest;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use axum_helpers::ErrorResponse;
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    UnprocessableEntityResponse,
};
use observability::{HttpMetricsState, Protocol, metrics_router, track_http_metrics};
use utoipa::OpenApi;

pub use rest::{
    BatchEmbedRequest, BatchEmbedResponse, EmbedRequest, EmbedResponse, HealthResponse,
    RestDescriptor, RestEndpoints, RestState,
};

/// OpenAPI documentation for the REST adapter
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::root,
        rest::health_check,
        rest::embed,
        rest::embed_batch,
    ),
    components(
        schemas(
            EmbedRequest, EmbedResponse,
            BatchEmbedRequest, BatchEmbedResponse,
            HealthResponse, RestDescriptor, RestEndpoints,
            ErrorResponse
        ),
        responses(
            BadRequestValidationResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse,
            NotFoundResponse
        )
    ),
    tags(
        (name = "embedding", description = "Text embedding over REST")
    )
)]
pub struct RestApiDoc;

/// Create the REST router: `/`, `/health`, `/embed`, `/embed/batch` and `/metrics`
pub fn rest_router(state: RestState) -> Router {
    let http_metrics = HttpMetricsState::new(state.metrics.clone(), Protocol::Rest);
    let registry = state.metrics.clone();

    Router::new()
        .route("/", get(rest::root))
        .route(rest::HEALTH_PATH, get(rest::health_check))
        .route(rest::EMBED_PATH, post(rest::embed))
        .route(rest::BATCH_EMBED_PATH, post(rest::embed_batch))
        .with_state(state)
        .merge(metrics_router::<()>(registry))
        .route_layer(middleware::from_fn_with_state(
            http_metrics,
            track_http_metrics,
        ))
}
