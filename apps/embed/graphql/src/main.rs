//! Embedding GraphQL Service - Entry Point

use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use embed_graphql::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    embed_graphql::run(config).await
}
