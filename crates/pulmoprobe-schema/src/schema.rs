use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::info;

use pulmoprobe_core::FormInput;

use crate::error::SchemaError;
use crate::field::{parse_flag, FieldDescriptor, FieldKind, NumericRange};

const CANONICAL_SCHEMA_JSON: &str = include_str!("../schemas/pulmoprobe.json");

static CANONICAL: LazyLock<IntakeSchema> = LazyLock::new(|| {
    IntakeSchema::from_json(CANONICAL_SCHEMA_JSON)
        .unwrap_or_else(|e| panic!("embedded intake schema is invalid: {e}"))
});

/// The ordered list of fields an intake form collects and the model expects.
///
/// Field order is significant: it is the order of the encoded feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSchema {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl IntakeSchema {
    /// The built-in schema shipped with the client.
    ///
    /// # Panics
    ///
    /// Panics if the embedded schema fails its own checks. The JSON is a
    /// compile-time constant covered by tests, so a panic here is a packaging bug.
    pub fn canonical() -> &'static IntakeSchema {
        &CANONICAL
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: IntakeSchema = serde_json::from_str(json)?;
        schema.check()?;
        Ok(schema)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            schema_id = %schema.id,
            fields = schema.fields.len(),
            "loaded intake schema"
        );
        Ok(schema)
    }

    /// Structural checks run on every load.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty(self.id.clone()));
        }

        let mut seen = HashSet::new();
        let mut keys = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyName(field.label.clone()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }

            match &field.kind {
                FieldKind::Numeric { range } => {
                    if !(range.min.is_finite() && range.max.is_finite()) || range.min > range.max {
                        return Err(SchemaError::InvalidRange {
                            field: field.name.clone(),
                            min: range.min,
                            max: range.max,
                        });
                    }
                    if let Some(step) = range.step
                        && step <= 0.0
                    {
                        return Err(SchemaError::InvalidStep {
                            field: field.name.clone(),
                            step,
                        });
                    }
                }
                FieldKind::Categorical { options } => {
                    if options.is_empty() {
                        return Err(SchemaError::NoOptions(field.name.clone()));
                    }
                    let mut seen_options = HashSet::new();
                    for option in options {
                        if !seen_options.insert(option.as_str()) {
                            return Err(SchemaError::DuplicateOption {
                                field: field.name.clone(),
                                option: option.clone(),
                            });
                        }
                    }
                }
                FieldKind::Flag => {}
            }

            for key in feature_keys(field) {
                if !keys.insert(key.clone()) {
                    return Err(SchemaError::DuplicateFeatureKey {
                        field: field.name.clone(),
                        key,
                    });
                }
            }

            if let Some(default) = &field.default
                && !default_fits(&field.kind, default)
            {
                return Err(SchemaError::InvalidDefault {
                    field: field.name.clone(),
                    default: default.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// A fresh form populated with each field's initial value.
    pub fn default_input(&self) -> FormInput {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial_value()))
            .collect()
    }

    /// Section names in first-appearance order.
    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = Vec::new();
        for field in &self.fields {
            if !sections.contains(&field.section.as_str()) {
                sections.push(&field.section);
            }
        }
        sections
    }

    pub fn fields_in_section<'a>(
        &'a self,
        section: &'a str,
    ) -> impl Iterator<Item = &'a FieldDescriptor> + 'a {
        self.fields.iter().filter(move |f| f.section == section)
    }

    /// Number of entries an encoded feature vector will contain.
    pub fn feature_width(&self) -> usize {
        self.fields
            .iter()
            .map(|f| match &f.kind {
                FieldKind::Categorical { options } => options.len(),
                _ => 1,
            })
            .sum()
    }
}

/// Keys `encode` emits for one field.
fn feature_keys(field: &FieldDescriptor) -> Vec<String> {
    match &field.kind {
        FieldKind::Categorical { options } => {
            options.iter().map(|o| field.indicator_key(o)).collect()
        }
        _ => vec![field.name.clone()],
    }
}

fn default_fits(kind: &FieldKind, default: &str) -> bool {
    match kind {
        FieldKind::Numeric { range } => default.trim().is_empty()
            || default.trim().parse::<f64>().is_ok_and(|v| range.contains(v)),
        FieldKind::Categorical { options } => options.iter().any(|o| o == default),
        FieldKind::Flag => parse_flag(default).is_some(),
    }
}

// ── Schema variants ──────────────────────────────────────────────────────────

/// One difference between two schema variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum SchemaDifference {
    FieldAdded {
        field: String,
    },
    FieldRemoved {
        field: String,
    },
    KindChanged {
        field: String,
        from: String,
        to: String,
    },
    OptionsAdded {
        field: String,
        options: Vec<String>,
    },
    OptionsRemoved {
        field: String,
        options: Vec<String>,
    },
    OptionsReordered {
        field: String,
    },
    RangeChanged {
        field: String,
        from: NumericRange,
        to: NumericRange,
    },
}

impl fmt::Display for SchemaDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDifference::FieldAdded { field } => write!(f, "+ field {field}"),
            SchemaDifference::FieldRemoved { field } => write!(f, "- field {field}"),
            SchemaDifference::KindChanged { field, from, to } => {
                write!(f, "~ field {field}: {from} -> {to}")
            }
            SchemaDifference::OptionsAdded { field, options } => {
                write!(f, "+ {field} options: {}", options.join(", "))
            }
            SchemaDifference::OptionsRemoved { field, options } => {
                write!(f, "- {field} options: {}", options.join(", "))
            }
            SchemaDifference::OptionsReordered { field } => {
                write!(f, "~ {field} options reordered")
            }
            SchemaDifference::RangeChanged { field, from, to } => write!(
                f,
                "~ {field} range: [{}, {}] -> [{}, {}]",
                from.min, from.max, to.min, to.max
            ),
        }
    }
}

/// List every difference that changes how `to` encodes compared to `from`.
///
/// Labels, sections and hints are presentation only and are ignored.
pub fn diff(from: &IntakeSchema, to: &IntakeSchema) -> Vec<SchemaDifference> {
    let mut changes = Vec::new();

    for old in &from.fields {
        let Some(new) = to.field(&old.name) else {
            changes.push(SchemaDifference::FieldRemoved {
                field: old.name.clone(),
            });
            continue;
        };

        match (&old.kind, &new.kind) {
            (FieldKind::Numeric { range: a }, FieldKind::Numeric { range: b }) => {
                if a != b {
                    changes.push(SchemaDifference::RangeChanged {
                        field: old.name.clone(),
                        from: *a,
                        to: *b,
                    });
                }
            }
            (FieldKind::Categorical { options: a }, FieldKind::Categorical { options: b }) => {
                let added: Vec<String> = b.iter().filter(|o| !a.contains(*o)).cloned().collect();
                let removed: Vec<String> = a.iter().filter(|o| !b.contains(*o)).cloned().collect();
                let reordered = added.is_empty() && removed.is_empty() && a != b;
                if !added.is_empty() {
                    changes.push(SchemaDifference::OptionsAdded {
                        field: old.name.clone(),
                        options: added,
                    });
                }
                if !removed.is_empty() {
                    changes.push(SchemaDifference::OptionsRemoved {
                        field: old.name.clone(),
                        options: removed,
                    });
                }
                if reordered {
                    changes.push(SchemaDifference::OptionsReordered {
                        field: old.name.clone(),
                    });
                }
            }
            (FieldKind::Flag, FieldKind::Flag) => {}
            (a, b) => changes.push(SchemaDifference::KindChanged {
                field: old.name.clone(),
                from: a.type_name().to_string(),
                to: b.type_name().to_string(),
            }),
        }
    }

    for new in &to.fields {
        if from.field(&new.name).is_none() {
            changes.push(SchemaDifference::FieldAdded {
                field: new.name.clone(),
            });
        }
    }

    changes
}
