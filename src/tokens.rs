//! Well-known token addresses
//!
//! Display table for echoing user input: when a panel shows the
//! address it is querying, a recognized token renders as its symbol
//! instead of a 42-character hex string.

use alloy_primitives::Address;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::str::FromStr;

lazy_static! {
    /// Symbol lookup for the tokens the dashboard mentions by name.
    pub static ref KNOWN_TOKENS: HashMap<Address, &'static str> = {
        let tokens = [
            ("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", "WETH"),
            ("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC"),
            ("0xdAC17F958D2ee523a2206206994597C13D831ec7", "USDT"),
            ("0x6B175474E89094C44Da98b954EedcdeCB5BE3830", "DAI"),
            ("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599", "WBTC"),
            ("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9", "AAVE"),
            ("0x514910771AF9Ca656af840dff83E8264EcF986CA", "LINK"),
            ("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984", "UNI"),
            ("0x6982508145454Ce325dDbE47a25d4ec3d2311933", "PEPE"),
            ("0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE", "SHIB"),
        ];

        let mut map = HashMap::new();
        for (address, symbol) in tokens {
            if let Ok(address) = Address::from_str(address) {
                map.insert(address, symbol);
            }
        }
        map
    };
}

/// Symbol for a recognized token address.
pub fn symbol_for(address: &Address) -> Option<&'static str> {
    KNOWN_TOKENS.get(address).copied()
}

/// Short display form: the symbol when known, a truncated address
/// otherwise.
pub fn format_token(address: &Address) -> String {
    match symbol_for(address) {
        Some(symbol) => symbol.to_string(),
        None => {
            let hex = format!("{address:?}");
            format!("{}...", &hex[..8])
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
    fn known_tokens_render_as_symbols() {
        let aave = Address::from_str("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9").unwrap();
        assert_eq!(symbol_for(&aave), Some("AAVE"));
        assert_eq!(format_token(&aave), "AAVE");
    }

    #[test]
    fn unknown_tokens_render_truncated() {
        let unknown = Address::from_str("0x1111111111111111111111111111111111111111").unwrap();
        assert_eq!(symbol_for(&unknown), None);
        assert_eq!(format_token(&unknown), "0x111111...");
    }
}
