//! Background submission worker.
//!
//! The HTTP call blocks, so each submission runs on its own thread and
//! reports back over a channel the UI loop drains between frames.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::Value;

use pulmoprobe_client::Predictor;
use pulmoprobe_core::{FormInput, HistoryRecord, PredictionResult};

/// Terminal outcome of one submission. Exactly one is sent per worker.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    /// The service answered; the record is ready to append to history.
    Completed(HistoryRecord),
    /// Transport, status or parse failure. Never appended to history.
    Failed(PredictionResult),
}

impl SubmissionEvent {
    pub fn result(&self) -> &PredictionResult {
        match self {
            SubmissionEvent::Completed(record) => &record.output,
            SubmissionEvent::Failed(result) => result,
        }
    }
}

/// Handle to a running submission.
pub struct SubmissionHandle {
    events_rx: Receiver<SubmissionEvent>,
    _handle: JoinHandle<()>,
}

impl SubmissionHandle {
    /// Non-blocking check for the terminal event.
    ///
    /// A worker that exits without reporting is surfaced as a failure.
    pub fn try_recv(&self) -> Option<SubmissionEvent> {
        match self.events_rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(SubmissionEvent::Failed(
                PredictionResult::failed("submission worker stopped without a result"),
            )),
        }
    }
}

pub struct SubmissionWorker;

impl SubmissionWorker {
    /// Post `payload` on a background thread. `inputs` is what gets recorded
    /// in history if the call succeeds.
    pub fn spawn(
        predictor: Arc<dyn Predictor>,
        inputs: FormInput,
        payload: Value,
    ) -> SubmissionHandle {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run(predictor.as_ref(), inputs, &payload, tx);
        });

        SubmissionHandle {
            events_rx: rx,
            _handle: handle,
        }
    }

    fn run(
        predictor: &dyn Predictor,
        inputs: FormInput,
        payload: &Value,
        tx: Sender<SubmissionEvent>,
    ) {
        let result = predictor.predict(payload);
        let event = if result.is_error() {
            SubmissionEvent::Failed(result)
        } else {
            SubmissionEvent::Completed(HistoryRecord::new(inputs, result))
        };
        // The receiver is gone if the form was torn down mid-flight.
        let _ = tx.send(event);
    }
}
