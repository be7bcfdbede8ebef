use anyhow::Result;
use log::info;

use pose_stage::config::Config;
use pose_stage::relay::bridge;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "stage.toml".to_string());
    let config = Config::load(&config_path)?;

    info!("Starting relay...");
    bridge::run(config.relay).await
}
