use std::time::Duration;

use pulmoprobe_client::http::DEFAULT_ENDPOINT;
use pulmoprobe_schema::{FieldKind, IntakeSchema, PayloadFormat};
use pulmoprobe_tui::config::{
    load_config_from, read_config_from, save_config_to, ConfigSource, PulmoConfig,
};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, PulmoConfig::default());
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.payload_format, PayloadFormat::OneHot);
    assert_eq!(config.high_risk_marker, "High");
    assert!(config.client_config().timeout.is_none());
}

#[test]
fn save_then_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = PulmoConfig {
        endpoint: "http://127.0.0.1:5000".to_string(),
        payload_format: PayloadFormat::Raw,
        high_risk_marker: "Positive".to_string(),
        request_timeout_secs: Some(15),
        log_json: true,
        ..PulmoConfig::default()
    };
    save_config_to(&path, &config).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.client_config().timeout, Some(Duration::from_secs(15)));
    assert_eq!(loaded.dashboard_options().high_risk_marker, "Positive");
    assert!(!dir.path().join("nested").join("config.json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn unversioned_config_migrates_api_url_to_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "api_url": "http://localhost:5000/predict/", "high_risk_marker": "High" }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.endpoint, "http://localhost:5000");
    assert_eq!(
        pulmoprobe_client::HttpPredictor::new(&config.client_config()).url(),
        "http://localhost:5000/predict"
    );
}

#[test]
fn newer_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 99 }"#).unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));

    // Versions past u32 must not wrap around into a supported one.
    std::fs::write(&path, r#"{ "config_version": 4294967297 }"#).unwrap();
    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn load_reports_where_the_config_came_from() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    assert_eq!(read_config_from(&path).unwrap().source, ConfigSource::Defaults);

    std::fs::write(&path, r#"{ "api_url": "http://localhost:5000/predict" }"#).unwrap();
    let loaded = read_config_from(&path).unwrap();
    assert_eq!(loaded.source, ConfigSource::Migrated { from: 0 });
    assert_eq!(loaded.config.endpoint, "http://localhost:5000");

    save_config_to(&path, &loaded.config).unwrap();
    assert_eq!(read_config_from(&path).unwrap().source, ConfigSource::File);
}

#[test]
fn configured_schema_replaces_built_in() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("variant.json");

    let mut variant = IntakeSchema::canonical().clone();
    variant.id = "pulmoprobe-variant".to_string();
    for field in &mut variant.fields {
        if let FieldKind::Categorical { options } = &mut field.kind
            && field.name == "cancer_stage"
        {
            options.retain(|o| o != "Stage IV");
        }
    }
    std::fs::write(&schema_path, serde_json::to_string(&variant).unwrap()).unwrap();

    let config = PulmoConfig {
        schema_path: Some(schema_path),
        ..PulmoConfig::default()
    };
    let loaded = config.load_schema().unwrap();

    assert_eq!(loaded.id, "pulmoprobe-variant");
    assert_eq!(loaded.field("cancer_stage").unwrap().options().len(), 3);
    assert_eq!(PulmoConfig::default().load_schema().unwrap(), *IntakeSchema::canonical());
}

#[test]
fn invalid_schema_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("broken.json");
    std::fs::write(&schema_path, r#"{ "id": "x", "name": "x", "fields": [] }"#).unwrap();

    let config = PulmoConfig {
        schema_path: Some(schema_path),
        ..PulmoConfig::default()
    };
    assert!(config.load_schema().is_err());
}

#[test]
fn log_file_override_is_used() {
    let config = PulmoConfig {
        log_file: Some("/tmp/pulmoprobe-test.log".into()),
        ..PulmoConfig::default()
    };
    assert_eq!(
        config.log_path().unwrap(),
        std::path::PathBuf::from("/tmp/pulmoprobe-test.log")
    );
}
