//! Server infrastructure module.
//!
//! This module provides:
//! - Router wrapping with tracing, compression and JSON fallbacks
//! - Listener setup with graceful shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let app = create_router(api_routes);
//! create_app(app, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod shutdown;

pub use app::{create_app, create_router, serve};
pub use shutdown::shutdown_signal;
