//! Prediction Snapshot Tool
//!
//! Run with: cargo run --bin fetch-predictions
//!
//! Fetches the raw price-prediction payload from the market-data API
//! and persists it to a local JSON file, where the forecast pipeline
//! picks it up for training.

use blockpulse::api::ApiClient;
use blockpulse::config::Config;
use color_eyre::eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    println!();
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           BLOCKPULSE PREDICTION SNAPSHOT TOOL              ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    let config = Config::from_env()?;
    config.validate()?;

    let client = ApiClient::from_config(&config);
    let request = client.price_prediction_page_request(0, config.snapshot_limit);

    println!("📡 Fetching {} prediction rows...", config.snapshot_limit);
    match client.fetch_raw(&request).await {
        Ok(payload) => {
            let pretty = serde_json::to_string_pretty(&payload)?;
            tokio::fs::write(&config.snapshot_path, pretty).await?;
            println!("✓ Data saved successfully to {}", config.snapshot_path);
            Ok(())
        }
        Err(error) => {
            eprintln!("✗ Failed to fetch data: {error}");
            std::process::exit(1);
        }
    }
}
