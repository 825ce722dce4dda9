//! Embedding GraphQL Service
//!
//! A single `/graphql` endpoint over the shared embedding contract:
//! `health` query, `embed` and `embedBatch` mutations. GraphiQL is served
//! on `GET /graphql`.

pub mod config;
pub mod server;

pub use config::Config;
pub use server::{build_app, run};
