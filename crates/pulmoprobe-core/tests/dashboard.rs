use pulmoprobe_core::dashboard::{
    summarize, Dashboard, DashboardOptions, GroupCount, RiskBreakdown, UNSPECIFIED_GROUP,
};
use pulmoprobe_core::{FormInput, History, HistoryRecord, PredictionResult};

fn record(country: &str, stage: &str, risk: &str) -> HistoryRecord {
    let inputs = FormInput::new()
        .with("age", "60")
        .with("country", country)
        .with("cancer_stage", stage);
    HistoryRecord::new(inputs, PredictionResult::new(risk, 80.0))
}

fn summary(history: &History) -> pulmoprobe_core::dashboard::DashboardSummary {
    match summarize(history, &DashboardOptions::default()) {
        Dashboard::Summary(s) => s,
        Dashboard::Empty => panic!("expected a populated summary"),
    }
}

#[test]
fn empty_history_reports_empty_state() {
    assert_eq!(
        summarize(&History::new(), &DashboardOptions::default()),
        Dashboard::Empty
    );
}

#[test]
fn counts_totals_high_risk_and_distinct_countries() {
    let history: History = vec![
        record("Sweden", "Stage II", "High Risk"),
        record("Sweden", "Stage I", "Low Risk"),
        record("Italy", "Stage II", "High Risk"),
        record("Spain", "Stage IV", "Low Risk"),
        record("Italy", "Stage II", "Low Risk"),
    ]
    .into_iter()
    .collect();

    let s = summary(&history);
    assert_eq!(s.total, 5);
    assert_eq!(s.high_risk, 2);
    assert_eq!(s.low_risk, 3);
    assert_eq!(s.distinct_values, 3);
    assert_eq!(s.breakdown, RiskBreakdown { low: 3, high: 2 });
}

#[test]
fn groups_keep_first_appearance_order() {
    let history: History = vec![
        record("Sweden", "Stage III", "Low Risk"),
        record("Sweden", "Stage I", "Low Risk"),
        record("Sweden", "Stage III", "High Risk"),
        record("Sweden", "Stage I", "Low Risk"),
        record("Sweden", "Stage III", "Low Risk"),
    ]
    .into_iter()
    .collect();

    let s = summary(&history);
    assert_eq!(
        s.groups,
        vec![
            GroupCount {
                name: "Stage III".to_string(),
                count: 3
            },
            GroupCount {
                name: "Stage I".to_string(),
                count: 2
            },
        ]
    );
    assert_eq!(s.max_group_count(), 3);
}

#[test]
fn high_risk_marker_is_case_sensitive_substring() {
    let history: History = vec![
        record("Sweden", "Stage I", "high risk"),
        record("Sweden", "Stage I", "Very High"),
    ]
    .into_iter()
    .collect();

    assert_eq!(summary(&history).high_risk, 1);
}

#[test]
fn missing_group_value_falls_into_unspecified() {
    let mut history = History::new();
    history.push(HistoryRecord::new(
        FormInput::new().with("country", "Belgium"),
        PredictionResult::new("Low Risk", 51.0),
    ));

    let s = summary(&history);
    assert_eq!(s.groups.len(), 1);
    assert_eq!(s.groups[0].name, UNSPECIFIED_GROUP);
}

#[test]
fn custom_options_change_grouping_field() {
    let history: History = vec![
        record("Sweden", "Stage I", "Elevated"),
        record("Finland", "Stage I", "Normal"),
    ]
    .into_iter()
    .collect();

    let options = DashboardOptions {
        high_risk_marker: "Elevated".to_string(),
        group_field: "country".to_string(),
        distinct_field: "cancer_stage".to_string(),
    };
    let Dashboard::Summary(s) = summarize(&history, &options) else {
        panic!("expected a populated summary");
    };
    assert_eq!(s.high_risk, 1);
    assert_eq!(s.distinct_values, 1);
    assert_eq!(s.groups.len(), 2);
}

#[test]
fn unset_values_are_unspecified_in_groups_and_distinct_counts() {
    let history: History = vec![
        record("", "", "Low Risk"),
        record("Sweden", "Stage I", "Low Risk"),
        record("", "Stage I", "High Risk"),
    ]
    .into_iter()
    .collect();

    let s = summary(&history);
    assert_eq!(s.distinct_values, 1);
    assert_eq!(s.groups[0].name, UNSPECIFIED_GROUP);
    assert_eq!(s.groups[0].count, 1);
}
