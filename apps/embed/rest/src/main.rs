//! Embedding REST Service - Entry Point

use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use embed_rest::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    embed_rest::run(config).await
}
