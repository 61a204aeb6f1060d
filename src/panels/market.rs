//! Market analytics panel
//!
//! Chain-wide NFT market report with a blockchain selector. Changing
//! the selection always supersedes the in-flight fetch - switching
//! chains twice quickly can only ever display the second chain.

use crate::api::{ApiClient, Blockchain, MarketAnalytics, RequestDescriptor};
use crate::fetch::{FetchController, FetchError, FetchState};

pub struct MarketPanel {
    client: ApiClient,
    blockchain: Blockchain,
    last_request: Option<RequestDescriptor>,
    controller: FetchController<MarketAnalytics>,
}

impl MarketPanel {
    pub fn new(client: ApiClient, blockchain: Blockchain) -> Self {
        Self {
            client,
            blockchain,
            last_request: None,
            controller: FetchController::new(),
        }
    }

    pub fn state(&self) -> FetchState<MarketAnalytics> {
        self.controller.state()
    }

    pub fn blockchain(&self) -> Blockchain {
        self.blockchain
    }

    /// Select a blockchain by name and re-fetch. Unknown names fail
    /// validation without a network call.
    pub fn set_blockchain(&mut self, input: &str) -> Result<(), FetchError> {
        let blockchain = match input.parse::<Blockchain>() {
            Ok(blockchain) => blockchain,
            Err(error) => {
                self.controller.fail(error.to_string());
                return Err(error);
            }
        };
        self.blockchain = blockchain;
        self.refresh();
        Ok(())
    }

    /// Re-fetch the current chain's report, superseding anything in
    /// flight.
    pub fn refresh(&mut self) {
        let request = self.client.market_analytics_request(self.blockchain);
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
            .begin(async move { client.fetch_first::<MarketAnalytics>(&request).await });
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> MarketPanel {
        MarketPanel::new(
            ApiClient::new("https://api.example.com", "k"),
            Blockchain::Ethereum,
        )
    }

    #[tokio::test]
    async fn switching_chains_rebuilds_the_descriptor() {
        let mut panel = panel();
        panel.refresh();
        assert!(panel
            .last_request
            .clone()
            .unwrap()
            .url
            .ends_with("blockchain=ethereum"));

        panel.set_blockchain("polygon").unwrap();
        assert_eq!(panel.blockchain(), Blockchain::Polygon);
        assert!(panel
            .last_request
            .clone()
            .unwrap()
            .url
            .ends_with("blockchain=polygon"));
        assert!(panel.state().is_loading());
    }

    #[tokio::test]
    async fn unknown_chain_is_a_validation_error() {
        let mut panel = panel();
        let error = panel.set_blockchain("dogechain").unwrap_err();
        assert!(error.is_validation());
        assert_eq!(panel.blockchain(), Blockchain::Ethereum);
        assert!(panel.state().error_message().is_some());
    }
}
