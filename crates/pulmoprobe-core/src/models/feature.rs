use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::CoreError;

/// Flat numeric payload expected by the prediction model.
///
/// Entries keep the order in which they were pushed, which is the order of
/// the schema that produced them. Serializes as a JSON object with keys in
/// that same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
    cold_fields: Vec<String>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Keys must be unique within one vector.
    pub fn push(&mut self, key: impl Into<String>, value: f64) -> Result<(), CoreError> {
        let key = key.into();
        if self.entries.iter().any(|(k, _)| *k == key) {
            return Err(CoreError::DuplicateFeature(key));
        }
        self.entries.push((key, value));
        Ok(())
    }

    /// Record a categorical field whose indicators are all zero.
    pub fn mark_cold(&mut self, field: impl Into<String>) {
        self.cold_fields.push(field.into());
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Categorical fields that had no selection and therefore could not be
    /// encoded.
    pub fn cold_fields(&self) -> &[String] {
        &self.cold_fields
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
