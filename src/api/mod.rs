//! UnleashNFTs market-data API client
//!
//! One thin client wraps every endpoint the dashboard reads. Each
//! request is described up front (URL + headers) so a panel can retry
//! or supersede it without rebuilding parameters.

use crate::config::Config;
use crate::fetch::FetchError;
use alloy_primitives::Address;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

mod types;

pub use types::{
    Blockchain, MarketAnalytics, Page, Pagination, PoolMetrics, PricePrediction, TokenMetrics,
};

// ============================================
// REQUEST DESCRIPTOR
// ============================================

/// The fully-specified parameters of one fetch attempt.
///
/// Immutable once built; a new descriptor supersedes and cancels any
/// prior in-flight request on the same panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

// ============================================
// CLIENT
// ============================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        // No request timeout: the upstream dashboard never had one, so
        // requests run until the API answers or the attempt is
        // superseded.
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base_url, &config.api_key)
    }

    fn request(&self, path_and_query: String) -> RequestDescriptor {
        RequestDescriptor {
            url: format!("{}{}", self.base_url, path_and_query),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("x-api-key".to_string(), self.api_key.clone()),
            ],
        }
    }

    // ========== Endpoint descriptors ==========

    /// Chain-wide NFT market insight report.
    pub fn market_analytics_request(&self, blockchain: Blockchain) -> RequestDescriptor {
        self.request(format!(
            "/nft/market-insights/analytics?blockchain={blockchain}"
        ))
    }

    /// Metrics for a single token.
    pub fn token_metrics_request(&self, token_address: Address, limit: u32) -> RequestDescriptor {
        self.request(format!(
            "/token/metrics?token_address={token_address}&offset=0&limit={limit}"
        ))
    }

    /// Metrics for a single liquidity pair.
    pub fn pool_metrics_request(&self, pair_address: Address, limit: u32) -> RequestDescriptor {
        self.request(format!(
            "/defi/pool/metrics?pair_address={pair_address}&offset=0&limit={limit}"
        ))
    }

    /// Upstream price-prediction series for a token.
    pub fn price_prediction_request(&self, token_address: Address, limit: u32) -> RequestDescriptor {
        self.request(format!(
            "/token/price_prediction?token_address={token_address}&offset=0&limit={limit}"
        ))
    }

    /// Unfiltered prediction page, used by the snapshot tool.
    pub fn price_prediction_page_request(&self, offset: u32, limit: u32) -> RequestDescriptor {
        self.request(format!(
            "/token/price_prediction?offset={offset}&limit={limit}"
        ))
    }

    // ========== Execution ==========

    /// Perform one GET and decode the paged envelope.
    ///
    /// An empty `data` collection is an error by policy: the dashboard
    /// treats it as bad input, never as a valid empty state.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<Page<T>, FetchError> {
        let body = self.execute(request).await?;
        let page: Page<T> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        if page.data.is_empty() {
            warn!("{} returned an empty result set", request.url);
            return Err(FetchError::EmptyResult);
        }
        Ok(page)
    }

    /// Fetch a page and keep only its first record.
    pub async fn fetch_first<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T, FetchError> {
        let mut page = self.fetch_page::<T>(request).await?;
        Ok(page.data.remove(0))
    }

    /// Fetch the raw JSON payload without shaping it. Used by the
    /// snapshot tool, which persists the body as-is.
    pub async fn fetch_raw(
        &self,
        request: &RequestDescriptor,
    ) -> Result<serde_json::Value, FetchError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn execute(&self, request: &RequestDescriptor) -> Result<String, FetchError> {
        debug!("GET {}", request.url);
        let mut builder = self.http.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {}", request.url, status);
            return Err(FetchError::Http(status.to_string()));
        }
        Ok(response.text().await?)
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn client() -> ApiClient {
        ApiClient::new("https://api.unleashnfts.com/api/v2", "test-key")
    }

    #[test]
    fn descriptors_embed_base_url_parameters_and_key() {
        let address = Address::from_str("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9").unwrap();
        let request = client().token_metrics_request(address, 30);

        assert_eq!(
            request.url,
            "https://api.unleashnfts.com/api/v2/token/metrics?\
             token_address=0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9&offset=0&limit=30"
        );
        assert!(request
            .headers
            .contains(&("x-api-key".to_string(), "test-key".to_string())));
        assert!(request
            .headers
            .contains(&("accept".to_string(), "application/json".to_string())));
    }

    #[test]
    fn market_analytics_descriptor_uses_chain_name() {
        let request = client().market_analytics_request(Blockchain::UnichainSepolia);
        assert_eq!(
            request.url,
            "https://api.unleashnfts.com/api/v2/nft/market-insights/analytics?blockchain=unichain_sepolia"
        );
    }

    #[test]
    fn trailing_slash_on_base_url_is_tolerated() {
        let client = ApiClient::new("https://api.example.com/v2/", "k");
        let request = client.price_prediction_page_request(0, 100);
        assert_eq!(
            request.url,
            "https://api.example.com/v2/token/price_prediction?offset=0&limit=100"
        );
    }

    #[test]
    fn pool_descriptor_reuses_pair_address_verbatim() {
        let pair = Address::from_str("0x002eceea7ed8a67bb6b75680f32e7be17d9415a7").unwrap();
        let request = client().pool_metrics_request(pair, 30);
        assert!(request.url.contains("/defi/pool/metrics?pair_address=0x"));
        assert!(request.url.ends_with("&offset=0&limit=30"));
    }
}
