use std::fs::OpenOptions;
use std::sync::Arc;

use eyre::Result;
use tracing_subscriber::EnvFilter;

use pulmoprobe_client::HttpPredictor;
use pulmoprobe_tui::app::App;
use pulmoprobe_tui::config;
use pulmoprobe_tui::session::Session;

fn main() -> Result<()> {
    color_eyre::install()?;

    let loaded = config::load_config()?;
    let config = loaded.config.clone();

    // Terminal output would corrupt the alternate screen, so logs go to a file.
    let log_path = config.log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    let (writer, _guard) = tracing_appender::non_blocking(file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    let config_path = config::config_path()?;
    loaded.log_source(&config_path);
    if loaded.source == config::ConfigSource::Defaults {
        config::save_config(&config)?;
    }

    tracing::info!(
        endpoint = %config.endpoint,
        format = ?config.payload_format,
        log = %log_path.display(),
        "starting pulmoprobe"
    );

    let schema = config.load_schema()?;
    let predictor = Arc::new(HttpPredictor::new(&config.client_config()));
    let session = Session::new(
        schema,
        config.payload_format,
        predictor,
        config.dashboard_options(),
    );

    let mut app = App::new(session, config.endpoint.clone());
    app.run()?;

    Ok(())
}
