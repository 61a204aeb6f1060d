//! Token metrics panel
//!
//! Starts without an address: the panel sits in `Idle` until the user
//! provides one, then every address change supersedes the in-flight
//! fetch and restarts at `Loading`.

use super::parse_address;
use crate::api::{ApiClient, RequestDescriptor, TokenMetrics};
use crate::fetch::{FetchController, FetchError, FetchState};
use alloy_primitives::Address;

const INVALID_ADDRESS: &str = "Please enter a valid token address.";

pub struct TokenMetricsPanel {
    client: ApiClient,
    page_limit: u32,
    address: Option<Address>,
    last_request: Option<RequestDescriptor>,
    controller: FetchController<TokenMetrics>,
}

impl TokenMetricsPanel {
    pub fn new(client: ApiClient, page_limit: u32) -> Self {
        Self {
            client,
            page_limit,
            address: None,
            last_request: None,
            controller: FetchController::new(),
        }
    }

    pub fn state(&self) -> FetchState<TokenMetrics> {
        self.controller.state()
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    /// Validate and set a new token address, kicking off a fetch.
    /// Invalid input fails fast: no descriptor, no network call.
    pub fn set_address(&mut self, input: &str) -> Result<(), FetchError> {
        let address = match parse_address(input, INVALID_ADDRESS) {
            Ok(address) => address,
            Err(error) => {
                self.controller.fail(error.to_string());
                return Err(error);
            }
        };
        self.address = Some(address);
        self.refresh();
        Ok(())
    }

    /// Re-fetch with the current address, superseding anything in
    /// flight. A no-op while no address is set.
    pub fn refresh(&mut self) {
        let Some(address) = self.address else {
            return;
        };
        let request = self.client.token_metrics_request(address, self.page_limit);
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
            .begin(async move { client.fetch_first::<TokenMetrics>(&request).await });
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> TokenMetricsPanel {
        TokenMetricsPanel::new(ApiClient::new("https://api.example.com", "k"), 30)
    }

    #[tokio::test]
    async fn starts_awaiting_input() {
        let panel = panel();
        assert!(panel.state().is_idle());
        assert!(panel.address().is_none());
    }

    #[tokio::test]
    async fn malformed_address_is_rejected_without_a_request() {
        let mut panel = panel();
        let error = panel.set_address("0x123").unwrap_err();

        assert!(error.is_validation());
        assert_eq!(
            panel.state().error_message(),
            Some("Please enter a valid token address.")
        );
        // No descriptor was ever built, so there is nothing to retry.
        assert!(panel.last_request.is_none());
        panel.retry();
        assert!(panel.state().error_message().is_some());
    }

    #[tokio::test]
    async fn valid_address_moves_to_loading_with_a_descriptor() {
        let mut panel = panel();
        panel
            .set_address("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9")
            .unwrap();

        assert!(panel.state().is_loading());
        let request = panel.last_request.clone().unwrap();
        assert!(request.url.contains("/token/metrics?token_address=0x7Fc6"));
    }

    #[tokio::test]
    async fn changing_the_address_replaces_the_descriptor() {
        let mut panel = panel();
        panel
            .set_address("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9")
            .unwrap();
        let first = panel.last_request.clone().unwrap();

        panel
            .set_address("0x514910771AF9Ca656af840dff83E8264EcF986CA")
            .unwrap();
        let second = panel.last_request.clone().unwrap();

        assert_ne!(first, second);
        assert!(second.url.contains("0x514910771AF9Ca656af840dff83E8264EcF986CA"));
        assert!(panel.state().is_loading());
    }
}
