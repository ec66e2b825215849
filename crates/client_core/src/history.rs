use std::sync::Arc;

use shared::domain::{EntryId, HistoryEntry};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{disclosure::DisclosureMap, AnalysisBackend, ClientEvent};

/// Read-only copy of the history controller's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub entries: Vec<HistoryEntry>,
    pub loading: bool,
    pub disclosure: DisclosureMap,
}

#[derive(Default)]
struct HistoryState {
    entries: Vec<HistoryEntry>,
    loading: bool,
    disclosure: DisclosureMap,
    generation: u64,
}

/// Owns the log of past analyses and the per-entry disclosure state.
pub struct HistoryController {
    backend: Arc<dyn AnalysisBackend>,
    inner: Mutex<HistoryState>,
    events: broadcast::Sender<ClientEvent>,
}

impl HistoryController {
    pub fn new(backend: Arc<dyn AnalysisBackend>, events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            backend,
            inner: Mutex::new(HistoryState::default()),
            events,
        }
    }

    /// Re-fetches the whole history and replaces the local list with it.
    ///
    /// Failures are logged and leave the previous list in place. A response
    /// that arrives after a newer refresh was started is dropped, and only the
    /// newest refresh clears the loading flag.
    pub async fn refresh(&self) {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.generation += 1;
            guard.loading = true;
            self.announce(&guard);
            guard.generation
        };
        debug!(generation, "history refresh started");

        let outcome = self.backend.fetch_history().await;

        let mut guard = self.inner.lock().await;
        let current = guard.generation == generation;
        match outcome {
            Ok(entries) if current => {
                info!(generation, entries = entries.len(), "history refreshed");
                guard.entries = entries;
            }
            Ok(_) => debug!(
                generation,
                latest = guard.generation,
                "discarding stale history response"
            ),
            Err(err) => warn!(generation, error = %err, "history refresh failed"),
        }
        if current {
            guard.loading = false;
        }
        self.announce(&guard);
    }

    /// Flips the disclosure state of `id` and returns the new value. The id
    /// need not be present in the current list.
    pub async fn toggle_disclosure(&self, id: &EntryId) -> bool {
        let mut guard = self.inner.lock().await;
        let expanded = guard.disclosure.toggle(id);
        debug!(%id, expanded, "toggled history entry");
        self.announce(&guard);
        expanded
    }

    pub async fn is_expanded(&self, id: &EntryId) -> bool {
        self.inner.lock().await.disclosure.is_expanded(id)
    }

    /// Forgets disclosure state for ids missing from the current list.
    pub async fn prune_disclosure(&self) {
        let mut guard = self.inner.lock().await;
        let HistoryState {
            entries,
            disclosure,
            ..
        } = &mut *guard;
        disclosure.retain_only(entries.iter().map(|entry| &entry.id));
    }

    pub async fn snapshot(&self) -> HistorySnapshot {
        let guard = self.inner.lock().await;
        HistorySnapshot {
            entries: guard.entries.clone(),
            loading: guard.loading,
            disclosure: guard.disclosure.clone(),
        }
    }

    fn announce(&self, state: &HistoryState) {
        let _ = self.events.send(ClientEvent::HistoryChanged {
            loading: state.loading,
            entries: state.entries.len(),
        });
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
