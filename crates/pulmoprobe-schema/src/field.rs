use serde::{Deserialize, Serialize};

/// Inclusive valid range for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// What kind of input a field accepts and how it is encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free numeric entry, passed through as a float.
    Numeric { range: NumericRange },
    /// One of a fixed set of labels, expanded to one indicator per option.
    Categorical { options: Vec<String> },
    /// Yes/no comorbidity flag, passed through as 0 or 1.
    Flag,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Numeric { .. } => "numeric",
            FieldKind::Categorical { .. } => "categorical",
            FieldKind::Flag => "flag",
        }
    }
}

/// A single intake form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub section: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FieldDescriptor {
    /// Initial form value: the explicit default, else the first option for
    /// categorical fields, `"0"` for flags and empty for numerics.
    pub fn initial_value(&self) -> String {
        if let Some(default) = &self.default {
            return default.clone();
        }
        match &self.kind {
            FieldKind::Numeric { .. } => String::new(),
            FieldKind::Categorical { options } => options.first().cloned().unwrap_or_default(),
            FieldKind::Flag => "0".to_string(),
        }
    }

    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Categorical { options } => options,
            _ => &[],
        }
    }

    /// Feature key for one categorical option, e.g. `cancer_stage_Stage II`.
    pub fn indicator_key(&self, option: &str) -> String {
        format!("{}_{}", self.name, option)
    }
}

/// Parse a flag value. Accepts `0`/`1` and `true`/`false`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
