//! DeFi pool metrics panel
//!
//! Opens with a default pair address and fetches immediately; every
//! pair change supersedes the in-flight fetch.

use super::parse_address;
use crate::api::{ApiClient, PoolMetrics, RequestDescriptor};
use crate::fetch::{FetchController, FetchError, FetchState};
use alloy_primitives::Address;

const INVALID_ADDRESS: &str = "Please enter a valid pair address.";

pub struct PoolMetricsPanel {
    client: ApiClient,
    page_limit: u32,
    pair_address: Address,
    last_request: Option<RequestDescriptor>,
    controller: FetchController<PoolMetrics>,
}

impl PoolMetricsPanel {
    pub fn new(client: ApiClient, pair_address: Address, page_limit: u32) -> Self {
        Self {
            client,
            page_limit,
            pair_address,
            last_request: None,
            controller: FetchController::new(),
        }
    }

    pub fn state(&self) -> FetchState<PoolMetrics> {
        self.controller.state()
    }

    pub fn pair_address(&self) -> Address {
        self.pair_address
    }

    /// Validate and set a new pair address, kicking off a fetch.
    pub fn set_pair_address(&mut self, input: &str) -> Result<(), FetchError> {
        let address = match parse_address(input, INVALID_ADDRESS) {
            Ok(address) => address,
            Err(error) => {
                self.controller.fail(error.to_string());
                return Err(error);
            }
        };
        self.pair_address = address;
        self.refresh();
        Ok(())
    }

    /// Re-fetch the current pair, superseding anything in flight.
    pub fn refresh(&mut self) {
        let request = self
            .client
            .pool_metrics_request(self.pair_address, self.page_limit);
        self.issue(request);
    }

    /// Manual retry: re-issue the last valid descriptor unchanged.
    pub fn retry(&mut self) {
        if let Some(request) = self.last_request.clone() {
            self.issue(request);
        }
    }

    /// Wait for the most recent fetch to settle.
    pub async fn settled(&mut self) {
        self.controller.settled().await;
    }

    fn issue(&mut self, request: RequestDescriptor) {
        self.last_request = Some(request.clone());
        let client = self.client.clone();
        self.controller
            .begin(async move { client.fetch_first::<PoolMetrics>(&request).await });
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn panel() -> PoolMetricsPanel {
        let pair = Address::from_str("0x002eceea7ed8a67bb6b75680f32e7be17d9415a7").unwrap();
        PoolMetricsPanel::new(ApiClient::new("https://api.example.com", "k"), pair, 30)
    }

    #[tokio::test]
    async fn refresh_builds_a_pool_descriptor() {
        let mut panel = panel();
        assert!(panel.state().is_idle());

        panel.refresh();
        assert!(panel.state().is_loading());
        let request = panel.last_request.clone().unwrap();
        assert!(request.url.contains("/defi/pool/metrics?pair_address=0x002"));
    }

    #[tokio::test]
    async fn invalid_pair_keeps_the_previous_address() {
        let mut panel = panel();
        let before = panel.pair_address();

        assert!(panel.set_pair_address("nope").is_err());
        assert_eq!(panel.pair_address(), before);
        assert_eq!(
            panel.state().error_message(),
            Some("Please enter a valid pair address.")
        );
    }

    #[tokio::test]
    async fn retry_reissues_the_same_descriptor() {
        let mut panel = panel();
        panel.refresh();
        let first = panel.last_request.clone().unwrap();

        panel.retry();
        assert_eq!(panel.last_request.clone().unwrap(), first);
        assert!(panel.state().is_loading());
    }
}
