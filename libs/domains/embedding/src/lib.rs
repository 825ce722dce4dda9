//! Embedding Domain Library
//!
//! One embedding contract served through three protocol adapters. The
//! contract owns the model handle and a bounded inference pool; adapters
//! translate their wire shapes onto it and report to a shared metrics
//! registry.
//!
//! # Architecture
//!
//! ```text
//!  ┌─────────────┐  ┌────────────────┐  ┌──────────────────┐
//!  │ REST router │  │ GraphQL schema │  │ gRPC (proto conv)│
//!  └──────┬──────┘  └───────┬────────┘  └────────┬─────────┘
//!         └─────────────────┼────────────────────┘
//!                 ┌─────────▼──────────┐
//!                 │ EmbeddingContract  │  ← validation, post-conditions, timing
//!                 │ (EmbeddingService) │
//!                 └─────────┬──────────┘
//!                 ┌─────────▼──────────┐
//!                 │   InferencePool    │  ← semaphore + spawn_blocking
//!                 └─────────┬──────────┘
//!                 ┌─────────▼──────────┐
//!                 │   EmbeddingModel   │  ← HashingEmbedder / FastEmbedModel
//!                 └────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_embedding::{EmbeddingContract, EmbeddingService, InferencePool, ModelConfig, load_model};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = load_model(&ModelConfig::hashing("all-MiniLM-L6-v2"))?;
//! let service = EmbeddingService::new(model, InferencePool::new(4));
//!
//! let result = service.embed("hello world").await?;
//! assert_eq!(result.vector.len(), 384);
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod model;
pub mod models;
pub mod pool;
pub mod service;

// Re-export commonly used types
pub use error::{EMPTY_BATCH, EMPTY_TEXT, EmbeddingError, EmbeddingResult, RestErrorMode};
pub use graphql::{EmbeddingSchema, build_schema, graphql_router};
pub use handlers::{RestApiDoc, RestState, rest_router};
pub use model::{
    Backend, DEFAULT_MODEL, EmbeddingModel, HashingEmbedder, ModelCatalog, ModelConfig,
    load_model,
};
#[cfg(feature = "fastembed")]
pub use model::FastEmbedModel;
pub use models::{BatchEmbedding, Embedding, HealthStatus, ModelInfo};
pub use pool::InferencePool;
pub use service::{EmbeddingContract, EmbeddingService, health};
