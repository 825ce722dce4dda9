//! # Axum Helpers
//!
//! Shared building blocks for the gateway's HTTP processes.
//!
//! ## Modules
//!
//! - **[`server`]**: Router wrapping, listener setup, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = create_router(Router::new()); // Add your routes
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod server;

// Re-export server types
pub use server::{create_app, create_router, serve, shutdown_signal};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};
