//! pulmoprobe-core
//!
//! Pure domain types for the PulmoProbe intake client: form input, feature
//! vectors, prediction results, the session history and its dashboard
//! aggregation. No I/O and no network dependency.

pub mod dashboard;
pub mod error;
pub mod models;

pub use error::CoreError;
pub use models::feature::FeatureVector;
pub use models::form::FormInput;
pub use models::history::{History, HistoryRecord};
pub use models::prediction::PredictionResult;
