//! gRPC Server Builder
//!
//! Provides utilities for creating gRPC servers with health checks,
//! compression, and standard configurations.
//!
//! ```ignore
//! use core_grpc::server::{GrpcServer, GrpcServerConfig, create_health_service};
//! use core_config::FromEnv;
//! use rpc::embedding::v1::embedding_service_server::{EmbeddingServiceServer, SERVICE_NAME};
//! use tonic::codec::CompressionEncoding;
//! use tonic::transport::Server;
//!
//! let config = GrpcServerConfig::from_env()?;
//! let (health_reporter, health_service) = create_health_service();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//!
//! Server::builder()
//!     .add_service(health_service)
//!     .add_service(
//!         EmbeddingServiceServer::new(my_impl)
//!             .accept_compressed(CompressionEncoding::Zstd)
//!             .send_compressed(CompressionEncoding::Zstd),
//!     )
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

mod builder;
mod config;

pub use builder::{GrpcServer, create_health_service};
pub use config::GrpcServerConfig;
