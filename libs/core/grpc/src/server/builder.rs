//! gRPC Server utilities.

use super::config::GrpcServerConfig;
use tonic_health::server::HealthReporter;
use tracing::info;

/// Helper for starting gRPC servers with health checks.
///
/// # Example
///
/// ```ignore
/// use core_grpc::server::{GrpcServer, GrpcServerConfig, create_health_service};
/// use rpc::embedding::v1::embedding_service_server::{EmbeddingServiceServer, SERVICE_NAME};
/// use tonic::transport::Server;
///
/// let config = GrpcServerConfig::from_env()?;
/// let (health_reporter, health_service) = create_health_service();
///
/// GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
/// GrpcServer::log_startup(&config, SERVICE_NAME);
///
/// Server::builder()
///     .add_service(health_service)
///     .add_service(EmbeddingServiceServer::new(my_service))
///     .serve(config.socket_addr()?)
///     .await?;
/// ```
pub struct GrpcServer;

impl GrpcServer {
    /// Log server startup information for a single service.
    pub fn log_startup(config: &GrpcServerConfig, service_name: &str) {
        info!(
            addr = %config.addr_string(),
            service = service_name,
            workers = config.max_workers,
            compression = config.enable_compression,
            max_message_size = config.max_decoding_message_size,
            "gRPC server starting"
        );

        if config.enable_compression {
            info!("Zstd compression enabled");
        }

        info!("Health check service enabled (grpc.health.v1.Health)");
    }

    /// Mark `service_name` and the empty service name as serving
    /// (empty is used by k8s default health checks).
    pub async fn setup_health(health_reporter: &HealthReporter, service_name: &str) {
        health_reporter
            .set_service_status(service_name, tonic_health::ServingStatus::Serving)
            .await;
        health_reporter
            .set_service_status("", tonic_health::ServingStatus::Serving)
            .await;

        info!(service = service_name, "Service marked as serving");
    }

    /// Flip both entries to NOT_SERVING, used when draining on shutdown.
    pub async fn mark_not_serving(health_reporter: &HealthReporter, service_name: &str) {
        health_reporter
            .set_service_status(service_name, tonic_health::ServingStatus::NotServing)
            .await;
        health_reporter
            .set_service_status("", tonic_health::ServingStatus::NotServing)
            .await;
    }
}

// Re-export health_reporter for convenience
pub use tonic_health::server::health_reporter as create_health_service;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_status_can_be_toggled() {
        let (reporter, _service) = create_health_service();

        GrpcServer::setup_health(&reporter, "embedding.v1.EmbeddingService").await;
        GrpcServer::mark_not_serving(&reporter, "embedding.v1.EmbeddingService").await;
        GrpcServer::setup_health(&reporter, "embedding.v1.EmbeddingService").await;
    }

    #[test]
    fn test_log_startup_does_not_panic() {
        GrpcServer::log_startup(&GrpcServerConfig::default(), "embedding.v1.EmbeddingService");
    }
}
