//! gRPC server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Model load (fatal, before any listener is bound)
//! - Bounded inference pool sized by `GRPC_MAX_WORKERS`
//! - Health check service (grpc.health.v1.Health)
//! - Side HTTP listener for `/metrics`
//! - gRPC server configuration, startup and graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum_helpers::server::{create_router, serve as serve_http, shutdown_signal};
use core_grpc::{GrpcServer, GrpcServerConfig, create_health_service};
use domain_embedding::{EmbeddingContract, EmbeddingService, InferencePool, load_model};
use eyre::{Result, WrapErr};
use observability::{MetricsRegistry, metrics_router, spawn_upkeep};
use rpc::embedding::v1::embedding_service_server::{EmbeddingServiceServer, SERVICE_NAME};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tracing::info;

use crate::config::Config;
use crate::service::EmbeddingServiceImpl;

/// Wrap the service with codec limits and optional zstd compression.
pub fn embedding_server(
    service: EmbeddingServiceImpl,
    config: &GrpcServerConfig,
) -> EmbeddingServiceServer<EmbeddingServiceImpl> {
    let server = EmbeddingServiceServer::new(service)
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);

    if config.enable_compression {
        server
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd)
    } else {
        server
    }
}

/// Serve the embedding and health services on `listener` until `shutdown`
/// resolves. Health flips to NOT_SERVING before in-flight calls drain.
pub async fn serve<F>(
    listener: TcpListener,
    service: EmbeddingServiceImpl,
    config: &GrpcServerConfig,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    let (health_reporter, health_service) = create_health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let drain = async move {
        shutdown.await;
        GrpcServer::mark_not_serving(&health_reporter, SERVICE_NAME).await;
        info!("Draining in-flight RPCs");
    };

    Server::builder()
        .concurrency_limit_per_connection(config.max_workers)
        .http2_keepalive_interval(Some(Duration::from_secs(config.keepalive_secs)))
        .add_service(health_service)
        .add_service(embedding_server(service, config))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), drain)
        .await
}

/// Run the gRPC server
///
/// 1. Loads the model and builds the contract with a pool of
///    `max_workers` inference workers
/// 2. Starts the metrics listener on `METRICS_PORT`
/// 3. Serves gRPC with health checks until SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, an address is invalid,
/// a listener cannot bind, or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    let grpc = &config.grpc;

    let model = load_model(&config.model).wrap_err("Failed to load embedding model")?;
    let contract: Arc<dyn EmbeddingContract> = Arc::new(EmbeddingService::new(
        model,
        InferencePool::new(grpc.max_workers),
    ));

    let metrics = Arc::new(MetricsRegistry::new().wrap_err("Failed to build metrics registry")?);
    let upkeep = spawn_upkeep(metrics.clone());

    let metrics_addr = grpc.metrics_addr().wrap_err("Invalid metrics address")?;
    let metrics_listener = TcpListener::bind(metrics_addr)
        .await
        .wrap_err_with(|| format!("Failed to bind metrics listener on {metrics_addr}"))?;
    let metrics_server = tokio::spawn(serve_http(
        metrics_listener,
        create_router(metrics_router::<()>(metrics.clone())),
        std::future::pending(),
    ));

    let addr = grpc.socket_addr().wrap_err("Invalid gRPC address")?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind gRPC listener on {addr}"))?;

    info!("{} v{}", config.app.name, config.app.version);
    GrpcServer::log_startup(grpc, SERVICE_NAME);
    info!("Metrics available on http://{}/metrics", metrics_addr);

    let service = EmbeddingServiceImpl::new(contract, metrics);
    let result = serve(listener, service, grpc, shutdown_signal())
        .await
        .wrap_err("gRPC server failed");

    metrics_server.abort();
    upkeep.abort();
    info!("gRPC server shutdown complete");
    result
}
