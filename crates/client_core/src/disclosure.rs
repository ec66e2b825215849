use std::collections::{HashMap, HashSet};

use shared::domain::EntryId;

/// Expanded/collapsed state per history entry. A missing key reads as
/// collapsed, so ids that drop out of the history can stay behind harmlessly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureMap {
    states: HashMap<EntryId, bool>,
}

impl DisclosureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &EntryId) -> bool {
        self.states.get(id).copied().unwrap_or(false)
    }

    /// Flips the state for `id` and returns the new value.
    pub fn toggle(&mut self, id: &EntryId) -> bool {
        let state = self.states.entry(id.clone()).or_insert(false);
        *state = !*state;
        *state
    }

    pub fn set(&mut self, id: EntryId, expanded: bool) {
        self.states.insert(id, expanded);
    }

    /// Drops every key not in `live`.
    pub fn retain_only<'a>(&mut self, live: impl IntoIterator<Item = &'a EntryId>) {
        let live: HashSet<&EntryId> = live.into_iter().collect();
        self.states.retain(|id, _| live.contains(id));
    }

    pub fn tracked(&self) -> usize {
        self.states.len()
    }
}
