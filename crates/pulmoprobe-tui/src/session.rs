//! Intake form state and the session that owns the prediction history.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use pulmoprobe_client::Predictor;
use pulmoprobe_core::dashboard::{summarize, Dashboard, DashboardOptions};
use pulmoprobe_core::{FormInput, History, PredictionResult};
use pulmoprobe_schema::field::parse_flag;
use pulmoprobe_schema::{build_payload, validate, FieldDescriptor, FieldKind, IntakeSchema, PayloadFormat};

use crate::submission::{SubmissionEvent, SubmissionHandle, SubmissionWorker};

/// Example patient loaded by "sample data".
const SAMPLE_PATIENT: &[(&str, &str)] = &[
    ("age", "55"),
    ("bmi", "22.5"),
    ("cholesterol_level", "180"),
    ("gender", "Male"),
    ("country", "Sweden"),
    ("cancer_stage", "Stage II"),
    ("family_history", "0"),
    ("smoking_status", "Never Smoked"),
    ("hypertension", "0"),
    ("asthma", "0"),
    ("cirrhosis", "0"),
    ("other_cancer", "0"),
    ("treatment_type", "Surgery"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Editing,
    /// A submission worker is running; all controls are locked.
    InFlight,
    /// The last submission's outcome is on screen until the form is reset.
    Showing(PredictionResult),
}

pub struct IntakeForm {
    schema: IntakeSchema,
    format: PayloadFormat,
    input: FormInput,
    selected: usize,
    errors: BTreeMap<String, String>,
    phase: Phase,
    pending: Option<SubmissionHandle>,
}

impl IntakeForm {
    pub fn new(schema: IntakeSchema, format: PayloadFormat) -> Self {
        let input = schema.default_input();
        Self {
            schema,
            format,
            input,
            selected: 0,
            errors: BTreeMap::new(),
            phase: Phase::Editing,
            pending: None,
        }
    }

    pub fn schema(&self) -> &IntakeSchema {
        &self.schema
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_field(&self) -> Option<&FieldDescriptor> {
        self.schema.fields.get(self.selected)
    }

    /// Inline validation message for `field`, if the last submit flagged it.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::InFlight)
    }

    /// Editing is disabled while in flight and while a result is shown.
    pub fn is_locked(&self) -> bool {
        !matches!(self.phase, Phase::Editing)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            Phase::Showing(result) => Some(result),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        if self.schema.fields.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.schema.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.schema.fields.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.schema.fields.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Type into the selected field.
    ///
    /// Numeric fields accept digits, `.` and `-`. Flags accept `1`/`y` and
    /// `0`/`n`. Categorical fields jump to the next option with that initial.
    pub fn input_char(&mut self, c: char) {
        self.edit(|field, value| match &field.kind {
            FieldKind::Numeric { .. } => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    value.push(c);
                }
            }
            FieldKind::Flag => match c {
                '1' | 'y' | 'Y' => *value = "1".to_string(),
                '0' | 'n' | 'N' => *value = "0".to_string(),
                _ => {}
            },
            FieldKind::Categorical { options } => jump_to_initial(options, value, c),
        });
    }

    pub fn delete_char(&mut self) {
        self.edit(|field, value| {
            if matches!(field.kind, FieldKind::Numeric { .. }) {
                value.pop();
            }
        });
    }

    /// Empty a numeric field; other kinds go back to their initial value.
    pub fn clear_field(&mut self) {
        self.edit(|field, value| match field.kind {
            FieldKind::Numeric { .. } => value.clear(),
            _ => *value = field.initial_value(),
        });
    }

    /// Step a categorical field through its options, or toggle a flag.
    pub fn cycle_option(&mut self, forward: bool) {
        self.edit(|field, value| match &field.kind {
            FieldKind::Categorical { options } if !options.is_empty() => {
                let n = options.len();
                let next = match options.iter().position(|o| o == value) {
                    Some(i) if forward => (i + 1) % n,
                    Some(i) => (i + n - 1) % n,
                    None => 0,
                };
                *value = options[next].clone();
            }
            FieldKind::Flag => {
                let on = parse_flag(value).unwrap_or(false);
                *value = if on { "0" } else { "1" }.to_string();
            }
            _ => {}
        });
    }

    pub fn load_sample_data(&mut self) {
        if self.is_locked() {
            return;
        }
        for (name, value) in SAMPLE_PATIENT {
            if self.schema.field(name).is_some() {
                self.input.set(*name, *value);
            }
        }
        self.errors.clear();
    }

    /// Validate and, if clean, post the form on a background worker.
    ///
    /// Returns `true` when a submission was started. Nothing is sent while
    /// the form is locked or has validation errors.
    pub fn submit(&mut self, predictor: Arc<dyn Predictor>) -> bool {
        if self.is_locked() {
            debug!(phase = ?self.phase, "submit ignored while form is locked");
            return false;
        }

        let errors = validate(&self.schema, &self.input);
        if !errors.is_empty() {
            info!(count = errors.len(), "submission blocked by validation");
            self.errors = errors.into_iter().map(|e| (e.field, e.message)).collect();
            if let Some(first) = self
                .schema
                .fields
                .iter()
                .position(|f| self.errors.contains_key(&f.name))
            {
                self.selected = first;
            }
            return false;
        }
        self.errors.clear();

        let payload = match build_payload(&self.schema, &self.input, self.format) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "failed to encode intake");
                self.phase = Phase::Showing(PredictionResult::failed(e.to_string()));
                return false;
            }
        };

        info!(schema_id = %self.schema.id, format = ?self.format, "submitting intake");
        self.pending = Some(SubmissionWorker::spawn(predictor, self.input.clone(), payload));
        self.phase = Phase::InFlight;
        true
    }

    /// Drain the pending worker. Yields its terminal event at most once.
    pub fn poll(&mut self) -> Option<SubmissionEvent> {
        let event = self.pending.as_ref()?.try_recv()?;
        self.pending = None;
        self.phase = Phase::Showing(event.result().clone());
        Some(event)
    }

    /// Back to schema defaults with no result or errors. Ignored in flight.
    pub fn reset(&mut self) {
        if self.is_busy() {
            return;
        }
        self.input = self.schema.default_input();
        self.errors.clear();
        self.selected = 0;
        self.phase = Phase::Editing;
    }

    fn edit(&mut self, apply: impl FnOnce(&FieldDescriptor, &mut String)) {
        if self.is_locked() {
            return;
        }
        let Some(field) = self.schema.fields.get(self.selected) else {
            return;
        };
        if !self.input.contains(&field.name) {
            self.input.set(field.name.clone(), String::new());
        }
        if let Some(value) = self.input.get_mut(&field.name) {
            apply(field, value);
        }
        self.errors.remove(&field.name);
    }
}

fn jump_to_initial(options: &[String], value: &mut String, c: char) {
    if options.is_empty() {
        return;
    }
    let start = options.iter().position(|o| o == value).map_or(0, |i| i + 1);
    let hit = (0..options.len())
        .map(|i| &options[(start + i) % options.len()])
        .find(|o| o.chars().next().is_some_and(|f| f.eq_ignore_ascii_case(&c)));
    if let Some(option) = hit {
        *value = option.clone();
    }
}

/// One running client session: the form, the predictor it submits to and
/// the history of successful predictions.
pub struct Session {
    form: IntakeForm,
    history: History,
    predictor: Arc<dyn Predictor>,
    options: DashboardOptions,
}

impl Session {
    pub fn new(
        schema: IntakeSchema,
        format: PayloadFormat,
        predictor: Arc<dyn Predictor>,
        options: DashboardOptions,
    ) -> Self {
        Self {
            form: IntakeForm::new(schema, format),
            history: History::new(),
            predictor,
            options,
        }
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut IntakeForm {
        &mut self.form
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn dashboard(&self) -> Dashboard {
        summarize(&self.history, &self.options)
    }

    pub fn submit(&mut self) -> bool {
        self.form.submit(Arc::clone(&self.predictor))
    }

    /// Consume a finished submission, if any. Returns `true` when one landed.
    pub fn poll(&mut self) -> bool {
        let Some(event) = self.form.poll() else {
            return false;
        };
        match event {
            SubmissionEvent::Completed(record) => {
                let total = self.history.len() + 1;
                let record = self.history.push(record);
                info!(
                    id = %record.short_id(),
                    risk = %record.output.risk,
                    confidence = record.output.confidence,
                    total,
                    "prediction recorded"
                );
            }
            SubmissionEvent::Failed(result) => {
                warn!(
                    error = result.error.as_deref().unwrap_or_default(),
                    "prediction failed, history unchanged"
                );
            }
        }
        true
    }

    /// Poll until no submission is in flight or `timeout` elapses.
    /// Returns `false` on timeout.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if !self.form.is_busy() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }
}
