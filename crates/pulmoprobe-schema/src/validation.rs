use serde::{Deserialize, Serialize};
use thiserror::Error;

use pulmoprobe_core::FormInput;

use crate::field::{parse_flag, FieldKind};
use crate::schema::IntakeSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Missing,
    NotANumber,
    OutOfRange { min: f64, max: f64 },
    UnknownOption,
    InvalidFlag,
}

/// A field value that blocks submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub value: String,
    pub kind: ValidationErrorKind,
    pub message: String,
}

/// Check every schema field of `input`. An empty result means the form may
/// be submitted.
pub fn validate(schema: &IntakeSchema, input: &FormInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for field in &schema.fields {
        let value = input.value(&field.name);

        let kind = if value.is_empty() {
            Some(ValidationErrorKind::Missing)
        } else {
            match &field.kind {
                FieldKind::Numeric { range } => match value.parse::<f64>() {
                    Ok(v) if range.contains(v) => None,
                    Ok(_) => Some(ValidationErrorKind::OutOfRange {
                        min: range.min,
                        max: range.max,
                    }),
                    Err(_) => Some(ValidationErrorKind::NotANumber),
                },
                FieldKind::Categorical { options } => {
                    if options.iter().any(|o| o == value) {
                        None
                    } else {
                        Some(ValidationErrorKind::UnknownOption)
                    }
                }
                FieldKind::Flag => match parse_flag(value) {
                    Some(_) => None,
                    None => Some(ValidationErrorKind::InvalidFlag),
                },
            }
        };

        if let Some(kind) = kind {
            let message = match &kind {
                ValidationErrorKind::Missing => format!("{} is required", field.label),
                ValidationErrorKind::NotANumber => {
                    format!("{}: '{}' is not a number", field.label, value)
                }
                ValidationErrorKind::OutOfRange { min, max } => format!(
                    "{}: {} is outside range [{}, {}]",
                    field.label, value, min, max
                ),
                ValidationErrorKind::UnknownOption => {
                    format!("{}: '{}' is not an allowed choice", field.label, value)
                }
                ValidationErrorKind::InvalidFlag => {
                    format!("{}: expected yes or no", field.label)
                }
            };
            errors.push(ValidationError {
                field: field.name.clone(),
                value: value.to_string(),
                kind,
                message,
            });
        }
    }

    errors
}
