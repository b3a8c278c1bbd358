use serde_json::Value;

use pulmoprobe_core::PredictionResult;

/// Something that can score an encoded intake payload.
///
/// Implementations never fail: transport and parse problems come back as
/// [`PredictionResult::failed`] so the caller only has one shape to render.
pub trait Predictor: Send + Sync {
    fn predict(&self, payload: &Value) -> PredictionResult;
}

impl<P: Predictor + ?Sized> Predictor for std::sync::Arc<P> {
    fn predict(&self, payload: &Value) -> PredictionResult {
        (**self).predict(payload)
    }
}
