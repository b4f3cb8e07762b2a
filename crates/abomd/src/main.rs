use anyhow::Result;
use clap::Parser;
use tracing::Level;

use abomd::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    abom_core::init_tracing(config.json, level);

    abomd::server::run(config).await
}
