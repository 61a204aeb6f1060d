//! Typed records for the market-data API.
//!
//! Field sets mirror the UnleashNFTs v2 payloads. Nullable fields in
//! the upstream schema stay `Option` here; everything else is required
//! so a malformed body fails loudly at decode time.

use crate::fetch::FetchError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================
// BLOCKCHAIN SELECTOR
// ============================================

/// Chains the market analytics endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blockchain {
    Ethereum,
    Binance,
    Polygon,
    Solana,
    Avalanche,
    Linea,
    Bitcoin,
    UnichainSepolia,
    /// Aggregate view across every supported chain.
    Full,
}

impl Blockchain {
    pub const ALL: [Blockchain; 9] = [
        Blockchain::Ethereum,
        Blockchain::Binance,
        Blockchain::Polygon,
        Blockchain::Solana,
        Blockchain::Avalanche,
        Blockchain::Linea,
        Blockchain::Bitcoin,
        Blockchain::UnichainSepolia,
        Blockchain::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Blockchain::Ethereum => "ethereum",
            Blockchain::Binance => "binance",
            Blockchain::Polygon => "polygon",
            Blockchain::Solana => "solana",
            Blockchain::Avalanche => "avalanche",
            Blockchain::Linea => "linea",
            Blockchain::Bitcoin => "bitcoin",
            Blockchain::UnichainSepolia => "unichain_sepolia",
            Blockchain::Full => "full",
        }
    }
}

impl std::fmt::Display for Blockchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Blockchain {
    type Err = FetchError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim().to_lowercase();
        Blockchain::ALL
            .into_iter()
            .find(|chain| chain.as_str() == needle)
            .ok_or_else(|| {
                FetchError::Validation(format!(
                    "unsupported blockchain '{input}' (try one of: {})",
                    Blockchain::ALL.map(|c| c.as_str()).join(", ")
                ))
            })
    }
}

// ============================================
// RESPONSE ENVELOPE
// ============================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pagination {
    pub has_next: bool,
    pub limit: u32,
    pub offset: u32,
    pub total_items: u64,
}

/// Every paged endpoint wraps its records the same way.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

// ============================================
// MARKET ANALYTICS
// ============================================

/// Chain-wide NFT market insight report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketAnalytics {
    pub block_dates: Vec<String>,
    pub blockchain: String,
    pub chain_id: u64,
    pub price_celling_trend: Vec<f64>,
    pub sales: f64,
    pub sales_change: f64,
    pub sales_trend: Vec<f64>,
    pub transactions: f64,
    pub transactions_change: f64,
    pub transactions_trend: Vec<f64>,
    pub transfers: f64,
    pub transfers_change: f64,
    pub transfers_trend: Vec<f64>,
    pub updated_at: String,
    pub volume: f64,
    pub volume_change: f64,
    pub volume_trend: Vec<f64>,
}

// ============================================
// TOKEN METRICS
// ============================================

/// Per-token market metrics plus the bitsCrunch score family.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenMetrics {
    #[serde(rename = "24hr_high")]
    pub high_24hr: f64,
    #[serde(rename = "24hr_high_change")]
    pub high_24hr_change: f64,
    #[serde(rename = "24hr_trading_volume")]
    pub trading_volume_24hr: f64,
    pub all_time_high: f64,
    pub all_time_low: f64,
    pub all_trading_volume: f64,
    pub blockchain: String,
    pub chain_id: u64,
    pub circulating_supply: f64,
    pub current_price: f64,
    pub fully_diluted_valuation: Option<f64>,
    pub holder_type_score: f64,
    pub holders: u64,
    pub holders_distribution_score: Option<f64>,
    pub lp_participants_score: f64,
    pub lp_size_score: f64,
    pub lp_stability_score: f64,
    pub market_cap: Option<f64>,
    pub marketcap_lp_score: f64,
    pub profitable_trade_score: f64,
    pub token_address: String,
    pub token_age_score: f64,
    pub token_holders_score: f64,
    pub token_name: String,
    pub token_pair_score: f64,
    pub token_score: Option<f64>,
    pub token_symbol: String,
    pub total_supply: f64,
    pub traders_score: f64,
    pub trading_pattern_score: f64,
    pub transactions_score: f64,
    pub volume_liquidity_score: f64,
    pub volume_score: f64,
}

impl TokenMetrics {
    /// "Name (SYMBOL)" header line for the panel.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.token_name, self.token_symbol)
    }
}

// ============================================
// DEFI POOL METRICS
// ============================================

/// Per-pair liquidity pool metrics with 24h/7d/30d/90d windows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PoolMetrics {
    pub blockchain: String,
    pub pair_address: String,
    pub protocol: String,
    pub token0: String,
    pub token0_price: Option<f64>,
    pub token0_reserve: f64,
    pub token0_share: f64,
    pub token0_tvl: f64,
    pub token1: String,
    pub token1_price: f64,
    pub token1_reserve: f64,
    pub token1_share: f64,
    pub token1_tvl: f64,
    pub total_tvl: f64,
    pub transactions_24hrs: f64,
    pub transactions_24hrs_change: f64,
    pub transactions_7d: f64,
    pub transactions_7d_change: f64,
    pub transactions_30d: f64,
    pub transactions_30d_change: f64,
    pub transactions_90d: f64,
    pub transactions_90d_change: f64,
    pub transactions_all: f64,
    pub volume_24hrs: f64,
    pub volume_24hrs_change: Option<f64>,
    pub volume_7d: f64,
    pub volume_7d_change: Option<f64>,
    pub volume_30d: f64,
    pub volume_30d_change: Option<f64>,
    pub volume_90d: f64,
    pub volume_90d_change: Option<f64>,
    pub volume_all: f64,
}

impl PoolMetrics {
    /// "TOKEN0/TOKEN1 on protocol" header line for the panel.
    pub fn pair_label(&self) -> String {
        format!("{}/{} on {}", self.token0, self.token1, self.protocol)
    }
}

// ============================================
// PRICE PREDICTION
// ============================================

/// One row of the upstream price-prediction series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricePrediction {
    pub block_date: String,
    pub data_type: String,
    pub open: f64,
    pub prediction: f64,
    pub prediction_lb: f64,
    pub prediction_ub: f64,
    pub token: String,
    pub token_address: String,
    pub token_symbol: String,
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blockchain_round_trips_through_strings() {
        for chain in Blockchain::ALL {
            assert_eq!(chain.as_str().parse::<Blockchain>().unwrap(), chain);
        }
        assert_eq!(
            " Ethereum ".parse::<Blockchain>().unwrap(),
            Blockchain::Ethereum
        );
    }

    #[test]
    fn unknown_blockchain_is_a_validation_error() {
        let error = "dogechain".parse::<Blockchain>().unwrap_err();
        assert!(error.is_validation());
        assert!(error.to_string().contains("unichain_sepolia"));
    }

    #[test]
    fn token_metrics_decode_with_renamed_and_nullable_fields() {
        let body = r#"{
            "24hr_high": 182.4,
            "24hr_high_change": -1.2,
            "24hr_trading_volume": 120000000.0,
            "all_time_high": 666.0,
            "all_time_low": 26.0,
            "all_trading_volume": 98000000000.0,
            "blockchain": "ethereum",
            "chain_id": 1,
            "circulating_supply": 15000000.0,
            "current_price": 180.1,
            "fully_diluted_valuation": null,
            "holder_type_score": 61.0,
            "holders": 169000,
            "holders_distribution_score": null,
            "lp_participants_score": 55.0,
            "lp_size_score": 70.0,
            "lp_stability_score": 64.0,
            "market_cap": null,
            "marketcap_lp_score": 48.0,
            "profitable_trade_score": 52.0,
            "token_address": "0x7fc66500c84a76ad7e9c93437bfc5ac33e2ddae9",
            "token_age_score": 95.0,
            "token_holders_score": 77.0,
            "token_name": "Aave",
            "token_pair_score": 60.0,
            "token_score": 66.5,
            "token_symbol": "AAVE",
            "total_supply": 16000000.0,
            "traders_score": 59.0,
            "trading_pattern_score": 44.0,
            "transactions_score": 58.0,
            "volume_liquidity_score": 49.0,
            "volume_score": 62.0
        }"#;

        let metrics: TokenMetrics = serde_json::from_str(body).unwrap();
        assert_eq!(metrics.high_24hr, 182.4);
        assert_eq!(metrics.market_cap, None);
        assert_eq!(metrics.display_name(), "Aave (AAVE)");
    }

    #[test]
    fn page_envelope_decodes_predictions() {
        let body = r#"{
            "data": [{
                "block_date": "2025-01-04",
                "data_type": "prediction",
                "open": 330.2,
                "prediction": 335.8,
                "prediction_lb": 320.0,
                "prediction_ub": 351.5,
                "token": "aave",
                "token_address": "0x7fc66500c84a76ad7e9c93437bfc5ac33e2ddae9",
                "token_symbol": "AAVE"
            }],
            "pagination": {
                "has_next": false,
                "limit": 30,
                "offset": 0,
                "total_items": 1
            }
        }"#;

        let page: Page<PricePrediction> = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.pagination.limit, 30);
        assert_eq!(page.data[0].prediction, 335.8);
    }

    #[test]
    fn pool_metrics_decode_with_nullable_changes() {
        let body = r#"{
            "blockchain": "ethereum",
            "pair_address": "0x002eceea7ed8a67bb6b75680f32e7be17d9415a7",
            "protocol": "uniswap",
            "token0": "WETH",
            "token0_price": null,
            "token0_reserve": 120.5,
            "token0_share": 50.1,
            "token0_tvl": 410000.0,
            "token1": "USDC",
            "token1_price": 1.0,
            "token1_reserve": 408000.0,
            "token1_share": 49.9,
            "token1_tvl": 408000.0,
            "total_tvl": 818000.0,
            "transactions_24hrs": 143.0,
            "transactions_24hrs_change": 4.2,
            "transactions_7d": 1010.0,
            "transactions_7d_change": -2.0,
            "transactions_30d": 4300.0,
            "transactions_30d_change": 1.1,
            "transactions_90d": 12100.0,
            "transactions_90d_change": 0.4,
            "transactions_all": 250000.0,
            "volume_24hrs": 1900000.0,
            "volume_24hrs_change": null,
            "volume_7d": 12000000.0,
            "volume_7d_change": 3.3,
            "volume_30d": 49000000.0,
            "volume_30d_change": null,
            "volume_90d": 160000000.0,
            "volume_90d_change": -1.8,
            "volume_all": 9800000000.0
        }"#;

        let metrics: PoolMetrics = serde_json::from_str(body).unwrap();
        assert_eq!(metrics.pair_label(), "WETH/USDC on uniswap");
        assert_eq!(metrics.volume_24hrs_change, None);
        assert_eq!(metrics.volume_7d_change, Some(3.3));
    }
}
