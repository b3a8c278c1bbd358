//! pulmoprobe-tui library root.
//!
//! Re-exports internal modules so that demos and integration tests can
//! drive the session and screens without a real terminal.

pub mod app;
pub mod config;
pub mod session;
pub mod submission;
pub mod ui;
