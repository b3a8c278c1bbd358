//! Smoke test for one end-to-end submission.
//!
//! Loads the sample patient, posts it to the configured (or overridden)
//! scoring endpoint and prints the outcome and dashboard summary.
//!
//! Usage:
//!   PULMOPROBE_ENDPOINT=http://127.0.0.1:5000 \
//!   cargo run -p pulmoprobe-tui --example submit_smoke

use std::sync::Arc;
use std::time::Duration;

use pulmoprobe_client::HttpPredictor;
use pulmoprobe_schema::build_payload;
use pulmoprobe_tui::config;
use pulmoprobe_tui::session::Session;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_env_filter("info").init();

    let loaded = config::load_config()?;
    loaded.log_source(&config::config_path()?);
    let mut config = loaded.config;
    if let Ok(endpoint) = std::env::var("PULMOPROBE_ENDPOINT") {
        config.endpoint = endpoint;
    }
    if config.request_timeout_secs.is_none() {
        config.request_timeout_secs = Some(30);
    }

    let predictor = HttpPredictor::new(&config.client_config());
    println!("╔══════════════════════════════════════════════════╗");
    println!("║      PulmoProbe Submission - Smoke Test          ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  Endpoint: {:<37} ║", predictor.url());
    println!("║  Format:   {:<37} ║", format!("{:?}", config.payload_format));
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    let schema = config.load_schema()?;
    let mut session = Session::new(
        schema,
        config.payload_format,
        Arc::new(predictor),
        config.dashboard_options(),
    );

    session.form_mut().load_sample_data();
    let form = session.form();
    let payload = build_payload(form.schema(), form.input(), config.payload_format)?;
    println!("Payload:");
    println!("{}", serde_json::to_string_pretty(&payload)?);
    println!();

    if !session.submit() {
        return Err(eyre::eyre!("sample patient failed validation"));
    }
    println!("Submitting...");
    if !session.wait(Duration::from_secs(60)) {
        return Err(eyre::eyre!("no answer within 60s"));
    }

    let result = session
        .form()
        .result()
        .ok_or_else(|| eyre::eyre!("submission finished without a result"))?;
    println!("  Risk:       {}", result.risk);
    println!("  Confidence: {}%", result.confidence);
    if let Some(error) = &result.error {
        println!("  Error:      {error}");
    }
    println!();

    println!("Dashboard:");
    println!("{}", serde_json::to_string_pretty(&session.dashboard())?);

    Ok(())
}
