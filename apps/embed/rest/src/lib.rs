//! Embedding REST Service
//!
//! JSON over HTTP front-end for the shared embedding contract.
//!
//! ## Endpoints
//!
//! - `GET /` service descriptor
//! - `GET /health` model name and dimension
//! - `POST /embed`, `POST /embed/batch`
//! - `GET /metrics` Prometheus text format
//! - `GET /docs` and `GET /openapi.json`

pub mod config;
pub mod server;

pub use config::Config;
pub use server::{build_app, run};
