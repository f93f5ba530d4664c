//! Debounced location search-as-you-type.
//!
//! At most one debounce task exists at a time: scheduling a new one aborts the
//! previous handle, and dropping the `Autocomplete` aborts whatever is pending.
//! Search failures only ever empty the suggestion list.

use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

use crate::{
    config::Config,
    error::ViewError,
    model::LocationSuggestion,
    orchestrator::{Orchestrator, ViewState},
    provider::{WeatherProvider, provider_from_config},
};

/// Queries shorter than this (after trimming) never reach the network.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    suggestions: Vec<LocationSuggestion>,
}

pub struct Autocomplete {
    provider: Arc<dyn WeatherProvider>,
    debounce: Duration,
    state: Arc<Mutex<SearchState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autocomplete")
            .field("debounce", &self.debounce)
            .field("state", &*self.state.lock())
            .field("pending", &self.pending.lock().is_some())
            .finish()
    }
}

impl Autocomplete {
    pub fn new(provider: Arc<dyn WeatherProvider>, debounce: Duration) -> Self {
        Self {
            provider,
            debounce,
            state: Arc::new(Mutex::new(SearchState::default())),
            pending: Mutex::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ViewError> {
        Ok(Self::new(provider_from_config(config)?, config.debounce()))
    }

    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    pub fn suggestions(&self) -> Vec<LocationSuggestion> {
        self.state.lock().suggestions.clone()
    }

    /// Update the pending query and (re)start the debounce timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_query(&self, text: &str) {
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        {
            let mut state = self.state.lock();
            state.query = text.to_string();
            if text.trim().chars().count() < MIN_QUERY_CHARS {
                state.suggestions.clear();
                return;
            }
        }

        let provider = self.provider.clone();
        let state = self.state.clone();
        let query = text.to_string();
        let debounce = self.debounce;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            tracing::debug!(query = %query, "searching locations");

            let result = provider.search(&query).await;

            let mut state = state.lock();
            if state.query != query {
                return;
            }
            match result {
                Ok(suggestions) => state.suggestions = suggestions,
                Err(err) => {
                    tracing::warn!(query = %query, error = ?err, "location search failed");
                    state.suggestions.clear();
                }
            }
        }));
    }

    /// Wait for the pending search, if any, to finish.
    pub async fn settled(&self) {
        let handle = self.pending.lock().take();
        if let Some(handle) = handle {
            // Aborted tasks resolve to a cancellation error; nothing to report.
            let _ = handle.await;
        }
    }

    /// Suggestions for `text` once its search has settled.
    ///
    /// When `text` is already the pending or last searched query, the result of
    /// that search is reused instead of starting a new debounce and request.
    pub async fn suggestions_for(&self, text: &str) -> Vec<LocationSuggestion> {
        if self.query() != text {
            self.set_query(text);
        }
        self.settled().await;
        self.suggestions()
    }

    /// The listed suggestion whose label is exactly `label`, if any.
    pub fn matching(&self, label: &str) -> Option<LocationSuggestion> {
        let label = label.trim();
        self.state.lock().suggestions.iter().find(|s| s.label() == label).cloned()
    }

    /// Commit to a suggestion: clear the search and fetch weather for `name`.
    pub async fn select_suggestion(&self, name: &str, orchestrator: &Orchestrator) -> ViewState {
        self.cancel_pending();
        {
            let mut state = self.state.lock();
            state.query.clear();
            state.suggestions.clear();
        }

        orchestrator.fetch_weather(name).await
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
