//! Axum middleware for automatic HTTP request metrics.

use std::{sync::Arc, time::Instant};

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{Request, Response},
    middleware::Next,
};

use crate::{MetricsRegistry, Protocol};

/// State for [`track_http_metrics`].
#[derive(Clone, Debug)]
pub struct HttpMetricsState {
    pub registry: Arc<MetricsRegistry>,
    pub protocol: Protocol,
}

impl HttpMetricsState {
    pub fn new(registry: Arc<MetricsRegistry>, protocol: Protocol) -> Self {
        Self { registry, protocol }
    }
}

/// Records `http_requests_total` and `http_request_duration_seconds` for
/// every request passing through the router.
///
/// The path label is the matched route template when one is available, so
/// attach this with `route_layer` to keep cardinality bounded.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use observability::{HttpMetricsState, Protocol, track_http_metrics};
///
/// let state = HttpMetricsState::new(registry.clone(), Protocol::Rest);
/// let app = Router::new()
///     .route("/", get(handler))
///     .route_layer(middleware::from_fn_with_state(state, track_http_metrics));
/// ```
pub async fn track_http_metrics(
    State(state): State<HttpMetricsState>,
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    state.registry.record_http(
        state.protocol,
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::sample_value;
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    fn app(registry: Arc<MetricsRegistry>) -> Router {
        Router::new()
            .route("/items/{id}", get(|| async { "ok" }))
            .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route_layer(middleware::from_fn_with_state(
                HttpMetricsState::new(registry, Protocol::Rest),
                track_http_metrics,
            ))
    }

    #[tokio::test]
    async fn test_records_matched_route_template() {
        let registry = Arc::new(MetricsRegistry::new().unwrap());
        let app = app(registry.clone());

        for id in ["1", "2"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/items/{id}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let export = registry.export();
        assert_eq!(
            sample_value(
                &export,
                "http_requests_total",
                &[("path", "/items/{id}"), ("status", "200"), ("method", "GET")]
            ),
            Some(2.0)
        );
    }

    #[tokio::test]
    async fn test_records_error_status() {
        let registry = Arc::new(MetricsRegistry::new().unwrap());

        app(registry.clone())
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            sample_value(
                &registry.export(),
                "http_requests_total",
                &[("path", "/boom"), ("status", "500"), ("protocol", "rest")]
            ),
            Some(1.0)
        );
    }
}
