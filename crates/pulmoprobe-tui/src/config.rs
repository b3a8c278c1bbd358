use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pulmoprobe_client::http::DEFAULT_ENDPOINT;
use pulmoprobe_client::ClientConfig;
use pulmoprobe_core::dashboard::DashboardOptions;
use pulmoprobe_schema::{diff, IntakeSchema, PayloadFormat};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const APP_DIR: &str = "pulmoprobe";
const PREDICT_SUFFIX: &str = "/predict";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulmoConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Base URL of the scoring service; `/predict` is appended per request.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub payload_format: PayloadFormat,
    /// Alternative intake schema. The built-in schema is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    #[serde(default = "default_marker")]
    pub high_risk_marker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write log lines as JSON objects instead of plain text.
    #[serde(default)]
    pub log_json: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_marker() -> String {
    DashboardOptions::default().high_risk_marker
}

impl Default for PulmoConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            endpoint: default_endpoint(),
            payload_format: PayloadFormat::default(),
            schema_path: None,
            high_risk_marker: default_marker(),
            request_timeout_secs: None,
            log_file: None,
            log_json: false,
        }
    }
}

impl PulmoConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            high_risk_marker: self.high_risk_marker.clone(),
            ..DashboardOptions::default()
        }
    }

    /// The intake schema in effect. A configured alternative is compared
    /// against the built-in one and every difference is logged.
    pub fn load_schema(&self) -> eyre::Result<IntakeSchema> {
        let Some(path) = &self.schema_path else {
            return Ok(IntakeSchema::canonical().clone());
        };

        let schema = IntakeSchema::load(path)?;
        let changes = diff(IntakeSchema::canonical(), &schema);
        if changes.is_empty() {
            tracing::info!(schema_id = %schema.id, "configured schema matches built-in encoding");
        }
        for change in &changes {
            tracing::warn!(schema_id = %schema.id, %change, "schema differs from built-in");
        }
        Ok(schema)
    }

    /// Log file path: the configured one or the per-user data directory.
    pub fn log_path(&self) -> eyre::Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let base =
            dirs::data_local_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
        Ok(base.join(APP_DIR).join("pulmoprobe.log"))
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Where a loaded config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file on disk; built-in defaults.
    Defaults,
    /// File was already at the current version.
    File,
    /// File was migrated up from an older version.
    Migrated { from: u32 },
}

/// A config together with how it was obtained.
///
/// Loading happens before logging is installed, so callers report the
/// source once the subscriber is up.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: PulmoConfig,
    pub source: ConfigSource,
}

impl LoadedConfig {
    pub fn log_source(&self, path: &Path) {
        match self.source {
            ConfigSource::Defaults => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
            }
            ConfigSource::File => {
                tracing::debug!(path = %path.display(), "loaded config");
            }
            ConfigSource::Migrated { from } => tracing::info!(
                path = %path.display(),
                from,
                to = CURRENT_VERSION,
                "migrated config"
            ),
        }
    }
}

/// Load the per-user config. A missing file yields defaults.
pub fn load_config() -> eyre::Result<LoadedConfig> {
    read_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<PulmoConfig> {
    Ok(read_config_from(path)?.config)
}

pub fn read_config_from(path: &Path) -> eyre::Result<LoadedConfig> {
    if !path.exists() {
        return Ok(LoadedConfig {
            config: PulmoConfig::default(),
            source: ConfigSource::Defaults,
        });
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let config: PulmoConfig = serde_json::from_value(migrated)?;
    let source = if on_disk_version < CURRENT_VERSION {
        ConfigSource::Migrated {
            from: on_disk_version,
        }
    } else {
        ConfigSource::File
    };
    Ok(LoadedConfig { config, source })
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update PulmoProbe."
        ));
    }

    // v0 → v1: full `api_url` (ending in /predict) becomes a base `endpoint`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(serde_json::Value::String(api_url)) = obj.remove("api_url") {
            let trimmed = api_url.trim().trim_end_matches('/');
            let endpoint = trimmed.strip_suffix(PREDICT_SUFFIX).unwrap_or(trimmed);
            obj.entry("endpoint")
                .or_insert(serde_json::Value::String(endpoint.to_string()));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
    }

    Ok(json)
}

pub fn save_config(config: &PulmoConfig) -> eyre::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &PulmoConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
