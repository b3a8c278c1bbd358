use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema '{0}' declares no fields")]
    Empty(String),

    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    #[error("field '{0}' has an empty name")]
    EmptyName(String),

    #[error("categorical field '{0}' has no options")]
    NoOptions(String),

    #[error("categorical field '{field}' repeats option '{option}'")]
    DuplicateOption { field: String, option: String },

    #[error("field '{field}' encodes to feature '{key}', which another field already produces")]
    DuplicateFeatureKey { field: String, key: String },

    #[error("numeric field '{field}' has an invalid range [{min}, {max}]")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("numeric field '{field}' has a non-positive step {step}")]
    InvalidStep { field: String, step: f64 },

    #[error("field '{field}' has a default '{default}' that does not fit its kind")]
    InvalidDefault { field: String, default: String },
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("field '{field}' is not a number: '{value}'")]
    NotANumber { field: String, value: String },

    #[error("field '{field}' is not a yes/no flag: '{value}'")]
    InvalidFlag { field: String, value: String },

    #[error("field '{field}' has no category '{value}'")]
    UnknownCategory { field: String, value: String },

    #[error(transparent)]
    Core(#[from] pulmoprobe_core::CoreError),
}
