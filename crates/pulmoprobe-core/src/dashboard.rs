//! Read-only summaries of the session history for the dashboard view.
//!
//! Everything is recomputed from the full history on each call. The chart
//! and table widgets consume [`DashboardSummary`] directly.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::history::History;

/// Label used for records that lack a value for the grouping field.
pub const UNSPECIFIED_GROUP: &str = "Unspecified";

/// Which fields and labels drive the aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOptions {
    /// Substring that marks a risk label as high risk.
    pub high_risk_marker: String,
    /// Form field used for the per-group bar chart.
    pub group_field: String,
    /// Form field whose distinct values are counted. Unset values are skipped.
    pub distinct_field: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            high_risk_marker: "High".to_string(),
            group_field: "cancer_stage".to_string(),
            distinct_field: "country".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Dashboard {
    /// No predictions yet; the view shows a prompt instead of zeroed stats.
    Empty,
    Summary(DashboardSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub high_risk: usize,
    pub low_risk: usize,
    pub distinct_values: usize,
    /// Per-group counts in first-appearance order.
    pub groups: Vec<GroupCount>,
    pub breakdown: RiskBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskBreakdown {
    pub low: usize,
    pub high: usize,
}

impl DashboardSummary {
    /// Largest group count, for scaling bar charts.
    pub fn max_group_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).max().unwrap_or(0)
    }
}

/// Summarize the full history.
pub fn summarize(history: &History, options: &DashboardOptions) -> Dashboard {
    if history.is_empty() {
        return Dashboard::Empty;
    }

    let records = history.records();
    let total = records.len();
    let high_risk = records
        .iter()
        .filter(|r| r.output.is_high_risk(&options.high_risk_marker))
        .count();

    // Unset values are unspecified, not a value of their own.
    let distinct_values = records
        .iter()
        .map(|r| r.inputs.value(&options.distinct_field))
        .filter(|v| !v.is_empty())
        .collect::<HashSet<_>>()
        .len();

    let mut groups: Vec<GroupCount> = Vec::new();
    for record in records {
        let name = match record.inputs.value(&options.group_field) {
            "" => UNSPECIFIED_GROUP,
            value => value,
        };
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }

    let low_risk = total - high_risk;

    Dashboard::Summary(DashboardSummary {
        total,
        high_risk,
        low_risk,
        distinct_values,
        groups,
        breakdown: RiskBreakdown {
            low: low_risk,
            high: high_risk,
        },
    })
}
