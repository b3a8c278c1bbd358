use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pulmoprobe_core::FormInput;

use crate::encoder::{encode, parse_number};
use crate::error::EncodeError;
use crate::field::{parse_flag, FieldKind};
use crate::schema::IntakeSchema;

/// Shape of the JSON body posted to the scoring endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// One-hot feature vector keyed by `{field}_{option}`.
    #[default]
    OneHot,
    /// Form fields by name with numbers and flags converted, categoricals
    /// as their label.
    Raw,
}

/// Build the request body for `input` in the requested format.
pub fn build_payload(
    schema: &IntakeSchema,
    input: &FormInput,
    format: PayloadFormat,
) -> Result<Value, EncodeError> {
    match format {
        PayloadFormat::OneHot => Ok(encode(schema, input)?.to_json()?),
        PayloadFormat::Raw => raw_payload(schema, input),
    }
}

fn raw_payload(schema: &IntakeSchema, input: &FormInput) -> Result<Value, EncodeError> {
    let mut body = Map::new();

    for field in &schema.fields {
        let value = input.value(&field.name);
        let json = match &field.kind {
            FieldKind::Numeric { .. } => {
                let number = parse_number(&field.name, value)?;
                serde_json::Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| EncodeError::NotANumber {
                        field: field.name.clone(),
                        value: value.to_string(),
                    })?
            }
            FieldKind::Flag => {
                let flag = parse_flag(value).ok_or_else(|| EncodeError::InvalidFlag {
                    field: field.name.clone(),
                    value: value.to_string(),
                })?;
                Value::from(u8::from(flag))
            }
            FieldKind::Categorical { options } => {
                if !options.iter().any(|o| o == value) {
                    return Err(EncodeError::UnknownCategory {
                        field: field.name.clone(),
                        value: value.to_string(),
                    });
                }
                Value::String(value.to_string())
            }
        };
        body.insert(field.name.clone(), json);
    }

    Ok(Value::Object(body))
}
