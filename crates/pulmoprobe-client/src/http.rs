//! JSON-over-HTTP prediction client.
//!
//! One POST per submission to `<endpoint>/predict`. No retry and no
//! backoff. Without a configured timeout a stalled endpoint blocks the
//! calling thread until the connection is closed.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};
use ureq::Agent;

use pulmoprobe_core::PredictionResult;

use crate::error::ClientError;
use crate::predictor::Predictor;

/// Scoring endpoint the hosted model is published at.
pub const DEFAULT_ENDPOINT: &str = "https://costaspinto-pulmoprobe.hf.space";

const PREDICT_PATH: &str = "/predict";

/// Where and how to reach the scoring service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; `/predict` is appended.
    pub endpoint: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

/// Wire shape of a scoring response.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    risk: String,
    confidence: f64,
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpPredictor {
    agent: Agent,
    url: String,
}

impl HttpPredictor {
    pub fn new(config: &ClientConfig) -> Self {
        let agent_config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build();

        Self {
            agent: agent_config.into(),
            url: predict_url(&config.endpoint),
        }
    }

    /// Full URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit `payload` once and classify the outcome.
    pub fn try_predict(&self, payload: &Value) -> Result<PredictionResult, ClientError> {
        let mut response = self
            .agent
            .post(&self.url)
            .header("accept", "application/json")
            .send_json(payload)
            .map_err(|e| ClientError::Transport {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ClientError::Transport {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PredictResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::ResponseParse(format!("{e}. Response: {body}")))?;

        if let Some(message) = parsed.error.filter(|m| !m.trim().is_empty()) {
            return Err(ClientError::Rejected(message));
        }

        Ok(PredictionResult::new(parsed.risk, parsed.confidence))
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, payload: &Value) -> PredictionResult {
        match self.try_predict(payload) {
            Ok(result) => {
                info!(
                    url = %self.url,
                    risk = %result.risk,
                    confidence = result.confidence,
                    "prediction complete"
                );
                result
            }
            Err(e) => {
                error!(url = %self.url, error = %e, "prediction failed");
                PredictionResult::failed(e.to_string())
            }
        }
    }
}

fn predict_url(endpoint: &str) -> String {
    let base = endpoint.trim().trim_end_matches('/');
    if base.ends_with(PREDICT_PATH) {
        base.to_string()
    } else {
        format!("{base}{PREDICT_PATH}")
    }
}
