//! pulmoprobe-client
//!
//! Submission of encoded payloads to the remote scoring service.

pub mod error;
pub mod http;
pub mod predictor;

pub use error::ClientError;
pub use http::{ClientConfig, HttpPredictor};
pub use predictor::Predictor;
