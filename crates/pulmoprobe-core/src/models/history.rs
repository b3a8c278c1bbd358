use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::FormInput;
use super::prediction::PredictionResult;

/// A completed submission: the inputs that were sent and what came back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub inputs: FormInput,
    pub output: PredictionResult,
    pub created_at: jiff::Timestamp,
}

impl HistoryRecord {
    pub fn new(inputs: FormInput, output: PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            inputs,
            output,
            created_at: jiff::Timestamp::now(),
        }
    }

    /// Compact patient identifier for tables, e.g. `P3FA91C`.
    pub fn short_id(&self) -> String {
        let simple = self.id.simple().to_string();
        format!("P{}", simple[..6].to_uppercase())
    }
}

/// Session-local, append-only list of completed submissions.
///
/// Most recent record last. Nothing here is written to disk.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: HistoryRecord) -> &HistoryRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<HistoryRecord> for History {
    fn from_iter<I: IntoIterator<Item = HistoryRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
