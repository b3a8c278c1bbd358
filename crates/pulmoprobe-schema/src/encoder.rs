//! Form input to model feature vector.
//!
//! Numeric fields pass through as floats, flags as 0/1, and every
//! categorical field expands into one `{field}_{option}` indicator per
//! option with exactly one set for a selected value.

use pulmoprobe_core::{FeatureVector, FormInput};

use crate::error::EncodeError;
use crate::field::{parse_flag, FieldKind};
use crate::schema::IntakeSchema;

/// Encode `input` against `schema`.
///
/// An unset categorical field encodes as all zeros and is listed in
/// [`FeatureVector::cold_fields`]; callers must treat it as not encodable.
pub fn encode(schema: &IntakeSchema, input: &FormInput) -> Result<FeatureVector, EncodeError> {
    let mut vector = FeatureVector::new();

    for field in &schema.fields {
        let value = input.value(&field.name);

        match &field.kind {
            FieldKind::Numeric { .. } => {
                let number = parse_number(&field.name, value)?;
                vector.push(field.name.as_str(), number)?;
            }
            FieldKind::Flag => {
                let flag = parse_flag(value).ok_or_else(|| EncodeError::InvalidFlag {
                    field: field.name.clone(),
                    value: value.to_string(),
                })?;
                vector.push(field.name.as_str(), if flag { 1.0 } else { 0.0 })?;
            }
            FieldKind::Categorical { options } => {
                if !value.is_empty() && !options.iter().any(|o| o == value) {
                    return Err(EncodeError::UnknownCategory {
                        field: field.name.clone(),
                        value: value.to_string(),
                    });
                }
                for option in options {
                    let hot = if option == value { 1.0 } else { 0.0 };
                    vector.push(field.indicator_key(option), hot)?;
                }
                if value.is_empty() {
                    vector.mark_cold(field.name.as_str());
                }
            }
        }
    }

    Ok(vector)
}

pub(crate) fn parse_number(field: &str, value: &str) -> Result<f64, EncodeError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EncodeError::NotANumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}
