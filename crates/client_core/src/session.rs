use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use crate::{
    history::HistoryController, submission::SubmissionController, view, AnalysisBackend,
    ClientEvent, ScreenView, EVENT_CHANNEL_CAPACITY,
};

/// Wires a submission controller to the history controller it refreshes,
/// over one shared backend and event channel.
pub struct AnalyzerSession {
    submission: SubmissionController,
    history: Arc<HistoryController>,
    events: broadcast::Sender<ClientEvent>,
}

impl AnalyzerSession {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let history = Arc::new(HistoryController::new(
            Arc::clone(&backend),
            events.clone(),
        ));
        let submission = SubmissionController::new(backend, Arc::clone(&history), events.clone());
        Self {
            submission,
            history,
            events,
        }
    }

    /// Builds the session and loads the initial history.
    pub async fn mount(backend: Arc<dyn AnalysisBackend>) -> Self {
        let session = Self::new(backend);
        info!("mounting analyzer session");
        session.history.refresh().await;
        session
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    pub async fn view(&self) -> ScreenView {
        let submission = self.submission.snapshot().await;
        let history = self.history.snapshot().await;
        view::render(&submission, &history)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}
