//! Panel state machines
//!
//! One module per dashboard panel. Every fetching panel follows the
//! same shape: it owns its query parameters, validates input before a
//! descriptor is ever built, and drives a `FetchController` so a
//! parameter change supersedes whatever is still in flight. Retry
//! re-issues the last descriptor unchanged.

mod market;
mod pool_metrics;
mod prediction;
mod price_forecast;
mod staking;
mod token_metrics;

pub use market::MarketPanel;
pub use pool_metrics::PoolMetricsPanel;
pub use prediction::PredictionPanel;
pub use price_forecast::ForecastPanel;
pub use staking::StakingPanel;
pub use token_metrics::TokenMetricsPanel;

use crate::fetch::FetchError;
use alloy_primitives::Address;
use std::str::FromStr;

/// Parse an address-like field (0x + 40 hex chars). The message is the
/// panel's, so each input box can keep its own wording.
pub(crate) fn parse_address(input: &str, message: &str) -> Result<Address, FetchError> {
    Address::from_str(input.trim()).map_err(|_| FetchError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_addresses_parse() {
        assert!(parse_address("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9", "bad").is_ok());
        assert!(parse_address("  0x002eceea7ed8a67bb6b75680f32e7be17d9415a7 ", "bad").is_ok());
    }

    #[test]
    fn malformed_addresses_fail_with_the_panel_message() {
        for input in ["", "0x123", "not-an-address", "7Fc66500c84A76Ad7e9c9343"] {
            let error = parse_address(input, "please enter a valid token address").unwrap_err();
            assert_eq!(
                error,
                FetchError::Validation("please enter a valid token address".to_string())
            );
        }
    }
}
