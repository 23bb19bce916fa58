//! Noise Dashboard Backend - Main Entry Point

use anyhow::Context;
use api::Settings;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    api::init_logging();

    info!("=== Noise Dashboard Backend v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("failed to load settings")?;
    api::run(settings).await
}
