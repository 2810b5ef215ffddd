//! Shared UI state holder.
//!
//! State lives in a `watch` channel so subscribers wake only when an action
//! actually changed something.

use crate::graph::SchemaSnapshot;
use crate::ui::derive::{view_model, ViewModel};
use crate::ui::state::{reduce, Action, UiState};
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot plus the current [`UiState`]
#[derive(Debug)]
pub struct Store {
    snapshot: Arc<SchemaSnapshot>,
    state: watch::Sender<UiState>,
}

impl Store {
    pub fn new(snapshot: Arc<SchemaSnapshot>, initial: UiState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { snapshot, state }
    }

    /// Apply an action; returns whether the state changed
    pub fn dispatch(&self, action: &Action) -> bool {
        let snapshot = &self.snapshot;
        let changed = self
            .state
            .send_if_modified(|state| reduce(state, action, snapshot));
        log::debug!("action {:?} changed state: {}", action, changed);
        changed
    }

    /// Copy of the current state
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> &Arc<SchemaSnapshot> {
        &self.snapshot
    }

    /// View model for the current state
    pub fn view(&self) -> ViewModel {
        let state = self.state.borrow();
        view_model(&self.snapshot, &state)
    }
}
