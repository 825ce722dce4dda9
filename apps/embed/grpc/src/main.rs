//! Embedding gRPC Service - Entry Point
//!
//! Minimal entry point that delegates to the server module.

use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use embed_grpc::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    embed_grpc::run(config).await
}
