//! Dashboard configuration
//!
//! Every external knob lives here: API endpoint and key, default panel
//! parameters, and the forecast/snapshot file locations. Nothing in
//! the panels embeds a literal URL or key.

use crate::api::Blockchain;
use alloy_primitives::Address;
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

// ============================================
// DEFAULTS
// ============================================

/// Market-data API the dashboard reads from.
pub const DEFAULT_API_BASE_URL: &str = "https://api.unleashnfts.com/api/v2";

/// Pair the DeFi pool panel opens with.
pub const DEFAULT_PAIR_ADDRESS: &str = "0x002eceea7ed8a67bb6b75680f32e7be17d9415a7";

/// Token the price-prediction panel opens with (AAVE).
pub const DEFAULT_PREDICTION_TOKEN: &str = "0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9";

// ============================================
// MAIN CONFIGURATION
// ============================================

/// Main configuration struct for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // ========== API Settings ==========
    /// Base URL of the market-data API
    pub api_base_url: String,

    /// API key sent as the x-api-key header (KEEP SECRET!)
    pub api_key: String,

    /// Page size for metric queries
    pub page_limit: u32,

    // ========== Panel Defaults ==========
    /// Blockchain the market analytics panel opens with
    pub blockchain: Blockchain,

    /// Pair address the DeFi pool panel opens with
    pub pair_address: String,

    /// Token address the price-prediction panel opens with
    pub prediction_token: String,

    // ========== Forecast Settings ==========
    /// Interpreter used to run the model script
    pub forecast_interpreter: String,

    /// Path to the model script
    pub forecast_script: String,

    /// File the model script writes its series to
    pub forecast_output: String,

    // ========== Snapshot Settings ==========
    /// File the snapshot tool persists the raw payload to
    pub snapshot_path: String,

    /// Page size for the snapshot tool
    pub snapshot_limit: u32,
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // API
            api_base_url: env::var("UNLEASH_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            api_key: env::var("UNLEASH_API_KEY").unwrap_or_default(),
            page_limit: env::var("PAGE_LIMIT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // Panel defaults
            blockchain: env::var("BLOCKCHAIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Blockchain::Ethereum),
            pair_address: env::var("PAIR_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_PAIR_ADDRESS.to_string()),
            prediction_token: env::var("PREDICTION_TOKEN")
                .unwrap_or_else(|_| DEFAULT_PREDICTION_TOKEN.to_string()),

            // Forecast
            forecast_interpreter: env::var("FORECAST_INTERPRETER")
                .unwrap_or_else(|_| "python".to_string()),
            forecast_script: env::var("FORECAST_SCRIPT")
                .unwrap_or_else(|_| "scripts/predict.py".to_string()),
            forecast_output: env::var("FORECAST_OUTPUT")
                .unwrap_or_else(|_| "predictions.json".to_string()),

            // Snapshot
            snapshot_path: env::var("SNAPSHOT_PATH").unwrap_or_else(|_| "data.json".to_string()),
            snapshot_limit: env::var("SNAPSHOT_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Default pair address as a typed Address
    pub fn pair_address(&self) -> Result<Address> {
        Address::from_str(&self.pair_address)
            .map_err(|_| eyre::eyre!("Invalid PAIR_ADDRESS: {}", self.pair_address))
    }

    /// Default prediction token as a typed Address
    pub fn prediction_token(&self) -> Result<Address> {
        Address::from_str(&self.prediction_token)
            .map_err(|_| eyre::eyre!("Invalid PREDICTION_TOKEN: {}", self.prediction_token))
    }

    /// Validate configuration before the dashboard starts
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(eyre::eyre!("UNLEASH_API_BASE_URL must not be empty"));
        }
        if self.api_key.is_empty() || self.api_key.contains("YOUR_API_KEY") {
            return Err(eyre::eyre!(
                "Invalid UNLEASH_API_KEY - set your market-data API key in .env"
            ));
        }
        if self.page_limit == 0 || self.snapshot_limit == 0 {
            return Err(eyre::eyre!("PAGE_LIMIT and SNAPSHOT_LIMIT must be >= 1"));
        }
        self.pair_address()?;
        self.prediction_token()?;
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║              BLOCKPULSE - CONFIGURATION                    ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ API Base URL:  {:<43} ║", self.api_base_url);
        println!(
            "║ API Key:       {:<43} ║",
            if self.api_key.is_empty() { "✗ Not Set" } else { "✓ Configured" }
        );
        println!("║ Page Limit:    {:<43} ║", self.page_limit);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ PANEL DEFAULTS                                             ║");
        println!("║ • Blockchain:  {:<43} ║", self.blockchain);
        println!("║ • Pair:        {:<43} ║", self.pair_address);
        println!("║ • Prediction:  {:<43} ║", self.prediction_token);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ FORECAST                                                   ║");
        println!("║ • Script:      {:<43} ║", self.forecast_script);
        println!("║ • Output:      {:<43} ║", self.forecast_output);
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            page_limit: 30,
            blockchain: Blockchain::Ethereum,
            pair_address: DEFAULT_PAIR_ADDRESS.to_string(),
            prediction_token: DEFAULT_PREDICTION_TOKEN.to_string(),
            forecast_interpreter: "python".to_string(),
            forecast_script: "scripts/predict.py".to_string(),
            forecast_output: "predictions.json".to_string(),
            snapshot_path: "data.json".to_string(),
            snapshot_limit: 100,
        }
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.blockchain, Blockchain::Ethereum);
        assert_eq!(config.page_limit, 30);
        assert!(config.pair_address().is_ok());
        assert!(config.prediction_token().is_ok());
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let config = Config {
            api_key: "test-api-key".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_addresses() {
        let config = Config {
            api_key: "k".to_string(),
            pair_address: "0x123".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            api_key: "k".to_string(),
            ..Config::default()
        };
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.api_key, "k");
        assert_eq!(parsed.blockchain, Blockchain::Ethereum);
        assert_eq!(parsed.snapshot_limit, 100);
    }
}
