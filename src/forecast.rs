//! Local price forecast
//!
//! Wraps the model script the dashboard ships with: run it, then read
//! back the JSON series it writes. The script is an opaque process
//! boundary; any failure along the way surfaces as a fetch error on
//! the forecast panel, never as a crash.

use crate::config::Config;
use crate::fetch::FetchError;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{info, warn};

/// One forecast day produced by the model script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub predicted_price: f64,
}

/// Runs the forecast model and reads back its output file.
#[derive(Debug, Clone)]
pub struct ForecastRunner {
    interpreter: String,
    script: PathBuf,
    output: PathBuf,
}

impl ForecastRunner {
    pub fn new(
        interpreter: impl Into<String>,
        script: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
            output: output.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.forecast_interpreter.as_str(),
            &config.forecast_script,
            &config.forecast_output,
        )
    }

    /// Run the model script, then parse the series it wrote.
    pub async fn run(&self) -> Result<Vec<ForecastPoint>, FetchError> {
        info!("running forecast script {}", self.script.display());

        let output = Command::new(&self.interpreter)
            .arg(&self.script)
            .output()
            .await
            .map_err(|e| FetchError::Network(format!("failed to start forecast script: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("forecast script failed: {}", stderr.trim());
            return Err(FetchError::Network(format!(
                "forecast script exited with {}",
                output.status
            )));
        }

        let body = tokio::fs::read_to_string(&self.output).await.map_err(|e| {
            FetchError::Network(format!("failed to read {}: {e}", self.output.display()))
        })?;
        parse_forecast(&body)
    }
}

/// Parse the script's `orient="records"` output. An empty series is an
/// error, matching the dashboard-wide empty-result policy.
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastPoint>, FetchError> {
    let points: Vec<ForecastPoint> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if points.is_empty() {
        return Err(FetchError::EmptyResult);
    }
    Ok(points)
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_records_layout_the_script_writes() {
        let body = r#"[
            { "date": "2025-01-05", "predicted_price": 331.75 },
            { "date": "2025-01-06", "predicted_price": 334.02 }
        ]"#;

        let points = parse_forecast(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "2025-01-05");
        assert_eq!(points[1].predicted_price, 334.02);
    }

    #[test]
    fn empty_series_is_an_error() {
        assert_eq!(parse_forecast("[]").unwrap_err(), FetchError::EmptyResult);
    }

    #[test]
    fn malformed_output_is_a_decode_error() {
        let error = parse_forecast("{\"date\": 1}").unwrap_err();
        assert!(matches!(error, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_interpreter_surfaces_as_a_network_error() {
        let runner = ForecastRunner::new(
            "definitely-not-an-interpreter",
            "scripts/predict.py",
            "predictions.json",
        );
        let error = runner.run().await.unwrap_err();
        assert!(matches!(error, FetchError::Network(_)));
    }
}
