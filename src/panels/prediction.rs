//! Token price prediction panel
//!
//! Shows the upstream prediction series for one token. Opens with a
//! default token (AAVE) and fetches immediately. Unlike the metric
//! panels it keeps the whole series, not just the first record.

use super::parse_address;
use crate::api::{ApiClient, PricePrediction, RequestDescriptor};
use crate::fetch::{FetchController, FetchError, FetchState};
use alloy_primitives::Address;

const INVALID_ADDRESS: &str = "Invalid token address. Please enter a valid Ethereum address.";

pub struct PredictionPanel {
    client: ApiClient,
    page_limit: u32,
    token_address: Address,
    last_request: Option<RequestDescriptor>,
    controller: FetchController<Vec<PricePrediction>>,
}

impl PredictionPanel {
    pub fn new(client: ApiClient, token_address: Address, page_limit: u32) -> Self {
        Self {
            client,
            page_limit,
            token_address,
            last_request: None,
            controller: FetchController::new(),
        }
    }

    pub fn state(&self) -> FetchState<Vec<PricePrediction>> {
        self.controller.state()
    }

    pub fn token_address(&self) -> Address {
        self.token_address
    }

    /// Validate and set a new token address, kicking off a fetch.
    pub fn set_token_address(&mut self, input: &str) -> Result<(), FetchError> {
        let address = match parse_address(input, INVALID_ADDRESS) {
            Ok(address) => address,
            Err(error) => {
                self.controller.fail(error.to_string());
                return Err(error);
            }
        };
        self.token_address = address;
        self.refresh();
        Ok(())
    }

    /// Re-fetch the current token's series, superseding anything in
    /// flight.
    pub fn refresh(&mut self) {
        let request = self
            .client
            .price_prediction_request(self.token_address, self.page_limit);
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
        self.controller.begin(async move {
            client
                .fetch_page::<PricePrediction>(&request)
                .await
                .map(|page| page.data)
        });
    }
}

// ============================================
// TESTS
// ============================================
