//! Local forecast panel
//!
//! The one panel that is not backed by the market API: it runs the
//! bundled model script and displays the 10-day series it writes. The
//! lifecycle is identical to the network panels - the script
//! invocation is just another fetch future.

use crate::fetch::{FetchController, FetchState};
use crate::forecast::{ForecastPoint, ForecastRunner};

pub struct ForecastPanel {
    runner: ForecastRunner,
    controller: FetchController<Vec<ForecastPoint>>,
}

impl ForecastPanel {
    pub fn new(runner: ForecastRunner) -> Self {
        Self {
            runner,
            controller: FetchController::new(),
        }
    }

    pub fn state(&self) -> FetchState<Vec<ForecastPoint>> {
        self.controller.state()
    }

    /// Run the model again, superseding a run still in progress.
    pub fn refresh(&mut self) {
        let runner = self.runner.clone();
        self.controller.begin(async move { runner.run().await });
    }

    /// Manual retry is identical to a refresh: there are no parameters
    /// to re-validate.
    pub fn retry(&mut self) {
        self.refresh();
    }

    /// Wait for the most recent run to settle.
    pub async fn settled(&mut self) {
        self.controller.settled().await;
    }
}

// ============================================
// TESTS
// ============================================
