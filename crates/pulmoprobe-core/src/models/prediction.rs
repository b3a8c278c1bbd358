use serde::{Deserialize, Serialize};

/// Risk label reported for a submission that never produced a model answer.
pub const ERROR_RISK: &str = "Error";

/// Outcome of one prediction request.
///
/// `risk` and `confidence` come back verbatim from the scoring service. A
/// failed request is represented by [`PredictionResult::failed`], never by a
/// missing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResult {
    pub fn new(risk: impl Into<String>, confidence: f64) -> Self {
        Self {
            risk: risk.into(),
            confidence,
            error: None,
        }
    }

    /// Sentinel result for a transport, status or parse failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            risk: ERROR_RISK.to_string(),
            confidence: 0.0,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Case-sensitive substring match against the risk label.
    pub fn is_high_risk(&self, marker: &str) -> bool {
        !self.is_error() && self.risk.contains(marker)
    }
}
