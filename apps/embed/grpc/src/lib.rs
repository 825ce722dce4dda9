//! Embedding gRPC Service
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional Zstd compression)
//! EmbeddingServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions)
//! EmbeddingService (domain contract)
//!   ↓ (bounded inference pool)
//! EmbeddingModel
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-driven process configuration
//! - `server`: server initialization and lifecycle
//! - `service`: gRPC service implementation (EmbeddingServiceImpl)

pub mod config;
pub mod server;
pub mod service;

// Re-export for convenience
pub use config::Config;
pub use server::{embedding_server, run, serve};
pub use service::EmbeddingServiceImpl;
