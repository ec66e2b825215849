use std::sync::Arc;

use shared::domain::AnalysisResult;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{history::HistoryController, AnalysisBackend, ClientEvent};

/// Read-only copy of the submission controller's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionSnapshot {
    pub input: String,
    pub submitting: bool,
    pub result: Option<AnalysisResult>,
}

#[derive(Default)]
struct SubmissionState {
    input: String,
    submitting: bool,
    result: Option<AnalysisResult>,
    generation: u64,
}

/// Owns the input text, the in-flight flag and the latest analysis result,
/// and drives the analyze-then-refresh sequence.
pub struct SubmissionController {
    backend: Arc<dyn AnalysisBackend>,
    history: Arc<HistoryController>,
    inner: Mutex<SubmissionState>,
    events: broadcast::Sender<ClientEvent>,
}

impl SubmissionController {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        history: Arc<HistoryController>,
        events: broadcast::Sender<ClientEvent>,
    ) -> Self {
        Self {
            backend,
            history,
            inner: Mutex::new(SubmissionState::default()),
            events,
        }
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.inner.lock().await.input = text.into();
    }

    pub async fn input(&self) -> String {
        self.inner.lock().await.input.clone()
    }

    /// Submits whatever is currently held as input.
    pub async fn submit_input(&self) {
        let text = self.input().await;
        self.submit(text).await;
    }

    /// Sends `text` for analysis, then refreshes history on success.
    ///
    /// The previous result is cleared before the request goes out. A
    /// successful reply without data still counts as success but shows no
    /// result. Failures are logged and leave no result. Overlapping calls are
    /// accepted; only the most recently started one may store its result,
    /// clear the input, trigger a refresh or clear the in-flight flag.
    pub async fn submit(&self, text: impl Into<String>) {
        let text = text.into();
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.generation += 1;
            guard.submitting = true;
            guard.result = None;
            self.announce(&guard);
            guard.generation
        };
        debug!(generation, chars = text.chars().count(), "submission started");

        match self.backend.analyze(&text).await {
            Ok(result) => {
                let applied = {
                    let mut guard = self.inner.lock().await;
                    if guard.generation == generation {
                        guard.input.clear();
                        guard.result = result;
                        self.announce(&guard);
                        true
                    } else {
                        debug!(
                            generation,
                            latest = guard.generation,
                            "discarding stale analysis response"
                        );
                        false
                    }
                };
                if applied {
                    info!(generation, "analysis received");
                    self.history.refresh().await;
                }
            }
            Err(err) => warn!(generation, error = %err, "analysis request failed"),
        }

        let mut guard = self.inner.lock().await;
        if guard.generation == generation {
            guard.submitting = false;
            self.announce(&guard);
        }
    }

    pub async fn snapshot(&self) -> SubmissionSnapshot {
        let guard = self.inner.lock().await;
        SubmissionSnapshot {
            input: guard.input.clone(),
            submitting: guard.submitting,
            result: guard.result.clone(),
        }
    }

    fn announce(&self, state: &SubmissionState) {
        let _ = self.events.send(ClientEvent::SubmissionChanged {
            submitting: state.submitting,
            has_result: state.result.is_some(),
        });
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
