//! Embedding gRPC service implementation
//!
//! Handlers translate proto messages onto the shared contract through the
//! From conversions in domain_embedding::conversions, and report every RPC
//! to the metrics registry with its canonical status name.

use std::sync::Arc;
use std::time::Instant;

use core_grpc::result_label;
use domain_embedding::{EmbeddingContract, health};
use observability::{MetricsRegistry, Protocol};
use rpc::embedding::v1::{
    BatchEmbedRequest, BatchEmbedResponse, EmbedRequest, EmbedResponse, HealthCheckRequest,
    HealthCheckResponse,
    embedding_service_server::{EmbeddingService as EmbeddingServiceTrait, SERVICE_NAME},
};
use tonic::{Request, Response, Status};
use tracing::debug;

/// gRPC service implementation for embedding operations
#[derive(Clone)]
pub struct EmbeddingServiceImpl {
    contract: Arc<dyn EmbeddingContract>,
    metrics: Arc<MetricsRegistry>,
}

impl EmbeddingServiceImpl {
    pub fn new(contract: Arc<dyn EmbeddingContract>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { contract, metrics }
    }

    fn finish<T>(&self, rpc: &str, start: Instant, result: &Result<Response<T>, Status>) {
        let status = result_label(result);
        self.metrics
            .record_request(Protocol::Grpc, rpc, SERVICE_NAME, status);
        self.metrics.record_latency(
            Protocol::Grpc,
            rpc,
            SERVICE_NAME,
            start.elapsed().as_secs_f64(),
        );
        debug!(rpc, status, "RPC completed");
    }

    fn record_inference(&self, rpc: &str, inference_time_ms: f64) {
        self.metrics
            .record_inference_latency(Protocol::Grpc, rpc, inference_time_ms / 1000.0);
    }
}

#[tonic::async_trait]
impl EmbeddingServiceTrait for EmbeddingServiceImpl {
    async fn embed(
        &self,
        request: Request<EmbedRequest>,
    ) -> Result<Response<EmbedResponse>, Status> {
        let start = Instant::now();
        let req = request.into_inner();

        let result = match self.contract.embed(&req.text).await {
            Ok(embedding) => {
                self.record_inference("Embed", embedding.inference_time_ms);
                Ok(Response::new(embedding.into()))
            }
            Err(e) => Err(Status::from(e)),
        };

        self.finish("Embed", start, &result);
        result
    }

    async fn embed_batch(
        &self,
        request: Request<BatchEmbedRequest>,
    ) -> Result<Response<BatchEmbedResponse>, Status> {
        let start = Instant::now();
        let req = request.into_inner();

        let result = match self.contract.embed_batch(req.texts).await {
            Ok(batch) => {
                self.record_inference("EmbedBatch", batch.inference_time_ms);
                Ok(Response::new(batch.into()))
            }
            Err(e) => Err(Status::from(e)),
        };

        self.finish("EmbedBatch", start, &result);
        result
    }

    async fn health_check(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let start = Instant::now();
        let result: Result<Response<HealthCheckResponse>, Status> =
            Ok(Response::new(health(self.contract.as_ref()).into()));
        self.finish("HealthCheck", start, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use observability::snapshot::sample_value;
    use test_utils::{FailingModel, StaticModel, service_with, test_metrics};

    fn service() -> (EmbeddingServiceImpl, Arc<MetricsRegistry>) {
        let metrics = test_metrics();
        let svc = EmbeddingServiceImpl::new(service_with(StaticModel::new(384)), metrics.clone());
        (svc, metrics)
    }

    fn count(metrics: &MetricsRegistry, rpc: &str, status: &str) -> Option<f64> {
        sample_value(
            &metrics.export(),
            "embedding_requests_total",
            &[("protocol", "grpc"), ("method", rpc), ("status", status)],
        )
    }

    #[tokio::test]
    async fn test_embed() {
        let (svc, metrics) = service();
        let response = svc
            .embed(Request::new(EmbedRequest {
                text: "hello world".into(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.embedding.len(), 384);
        assert_eq!(response.dimension, 384);
        assert!(response.inference_time_ms >= 0.0);
        assert_eq!(count(&metrics, "Embed", "OK"), Some(1.0));
    }

    #[tokio::test]
    async fn test_embed_empty_text_is_invalid_argument() {
        let (svc, metrics) = service();
        let status = svc
            .embed(Request::new(EmbedRequest { text: String::new() }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "Text cannot be empty");
        assert_eq!(count(&metrics, "Embed", "INVALID_ARGUMENT"), Some(1.0));
    }

    #[tokio::test]
    async fn test_embed_batch_empty_is_invalid_argument() {
        let (svc, _) = service();
        let status = svc
            .embed_batch(Request::new(BatchEmbedRequest { texts: vec![] }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "Texts list cannot be empty");
    }

    #[tokio::test]
    async fn test_embed_batch_abc() {
        let (svc, _) = service();
        let response = svc
            .embed_batch(Request::new(BatchEmbedRequest {
                texts: vec!["a".into(), "b".into(), "c".into()],
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.count, 3);
        assert_eq!(response.embeddings.len(), 3);
        assert!(response.embeddings.iter().all(|v| v.values.len() == 384));
    }

    #[tokio::test]
    async fn test_model_failure_is_internal() {
        let metrics = test_metrics();
        let svc = EmbeddingServiceImpl::new(
            service_with(FailingModel::new(4, "weights missing")),
            metrics.clone(),
        );

        let status = svc
            .embed(Request::new(EmbedRequest { text: "x".into() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "weights missing");
        assert_eq!(count(&metrics, "Embed", "INTERNAL"), Some(1.0));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (svc, metrics) = service();
        let response = svc
            .health_check(Request::new(HealthCheckRequest {}))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.status, "healthy");
        assert_eq!(response.model, "fake-model");
        assert_eq!(response.embedding_dimension, 384);
        assert_eq!(count(&metrics, "HealthCheck", "OK"), Some(1.0));
    }
}
