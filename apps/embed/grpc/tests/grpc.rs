use std::sync::Arc;

use core_grpc::GrpcServerConfig;
use domain_embedding::EmbeddingModel;
use embed_grpc::{EmbeddingServiceImpl, serve};
use observability::MetricsRegistry;
use rpc::embedding::v1::{
    BatchEmbedRequest, EmbedRequest, HealthCheckRequest,
    embedding_service_client::EmbeddingServiceClient,
    embedding_service_server::SERVICE_NAME,
};
use test_utils::{FailingModel, StaticModel, assertions::assert_sample, service_with, test_metrics};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::codec::CompressionEncoding;
use tonic::transport::Channel;
use tonic_health::pb::{
    HealthCheckRequest as StandardHealthRequest, health_check_response::ServingStatus,
    health_client::HealthClient,
};

struct TestServer {
    url: String,
    metrics: Arc<MetricsRegistry>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), tonic::transport::Error>>,
}

impl TestServer {
    async fn start(model: impl EmbeddingModel + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let metrics = test_metrics();
        let service = EmbeddingServiceImpl::new(service_with(model), metrics.clone());
        let (shutdown, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let config = GrpcServerConfig::default().with_max_workers(4);
            serve(listener, service, &config, async {
                let _ = rx.await;
            })
            .await
        });

        Self {
            url,
            metrics,
            shutdown,
            handle,
        }
    }

    async fn client(&self) -> EmbeddingServiceClient<Channel> {
        EmbeddingServiceClient::connect(self.url.clone()).await.unwrap()
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_embed_over_the_wire() {
    let server = TestServer::start(StaticModel::new(384)).await;
    let mut client = server.client().await;

    let response = client
        .embed(EmbedRequest {
            text: "hello world".into(),
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.dimension, 384);
    assert_eq!(response.embedding, StaticModel::new(384).vector_for("hello world"));
    assert!(response.inference_time_ms.is_finite() && response.inference_time_ms >= 0.0);

    server.stop().await;
}

#[tokio::test]
async fn test_zstd_compressed_batch() {
    let server = TestServer::start(StaticModel::new(64)).await;
    let mut client = server
        .client()
        .await
        .send_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Zstd);

    let response = client
        .embed_batch(BatchEmbedRequest {
            texts: vec!["a".into(), "b".into(), "c".into()],
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.count, 3);
    let model = StaticModel::new(64);
    for (text, vector) in ["a", "b", "c"].iter().zip(&response.embeddings) {
        assert_eq!(vector.values, model.vector_for(text));
    }

    server.stop().await;
}

#[tokio::test]
async fn test_failure_codes_over_the_wire() {
    let server = TestServer::start(FailingModel::new(8, "weights missing")).await;
    let mut client = server.client().await;

    let empty = client
        .embed(EmbedRequest { text: String::new() })
        .await
        .unwrap_err();
    assert_eq!(empty.code(), tonic::Code::InvalidArgument);
    assert_eq!(empty.message(), "Text cannot be empty");

    let empty_batch = client
        .embed_batch(BatchEmbedRequest { texts: vec![] })
        .await
        .unwrap_err();
    assert_eq!(empty_batch.code(), tonic::Code::InvalidArgument);
    assert_eq!(empty_batch.message(), "Texts list cannot be empty");

    let internal = client
        .embed(EmbedRequest { text: "x".into() })
        .await
        .unwrap_err();
    assert_eq!(internal.code(), tonic::Code::Internal);

    let export = server.metrics.export();
    let labels = |status: &'static str| -> [(&'static str, &'static str); 4] {
        [
            ("protocol", "grpc"),
            ("method", "Embed"),
            ("endpoint", SERVICE_NAME),
            ("status", status),
        ]
    };
    assert_sample(&export, "embedding_requests_total", &labels("INVALID_ARGUMENT"), 1.0);
    assert_sample(&export, "embedding_requests_total", &labels("INTERNAL"), 1.0);

    server.stop().await;
}

#[tokio::test]
async fn test_health_services() {
    let server = TestServer::start(StaticModel::new(384)).await;

    let mut client = server.client().await;
    let health = client
        .health_check(HealthCheckRequest {})
        .await
        .unwrap()
        .into_inner();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.model, "fake-model");
    assert_eq!(health.embedding_dimension, 384);

    let channel = Channel::from_shared(server.url.clone())
        .unwrap()
        .connect()
        .await
        .unwrap();
    let mut standard_health = HealthClient::new(channel);
    for service in [SERVICE_NAME, ""] {
        let response = standard_health
            .check(StandardHealthRequest {
                service: service.to_string(),
            })
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.status, ServingStatus::Serving as i32);
    }

    server.stop().await;
}
