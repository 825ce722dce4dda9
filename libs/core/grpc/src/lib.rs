//! # gRPC Server Library
//!
//! Shared server-side gRPC plumbing: environment-driven configuration,
//! standard health reporting and canonical status naming for metrics.
//!
//! ## Quick Start
//!
//! ```ignore
//! use core_grpc::{GrpcServer, GrpcServerConfig, create_health_service, code_label};
//!
//! let config = GrpcServerConfig::from_env()?;
//! let (reporter, health_service) = create_health_service();
//! GrpcServer::setup_health(&reporter, SERVICE_NAME).await;
//!
//! assert_eq!(code_label(tonic::Code::InvalidArgument), "INVALID_ARGUMENT");
//! ```

pub mod server;
pub mod status;

pub use server::{GrpcServer, GrpcServerConfig, create_health_service};
pub use status::{code_label, result_label};
