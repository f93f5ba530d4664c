//! Weather fetch orchestration: `Idle -> Loading -> {Data, Error}`.
//!
//! Every `fetch_weather` call takes a new generation number. A completion is
//! applied only while its generation is still the newest, so a slow response
//! can never overwrite the result of a request that started after it.

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    config::{Config, DEFAULT_FALLBACK_LOCATION},
    error::ViewError,
    geolocation::Geolocator,
    model::ForecastRequest,
    provider::{WeatherProvider, provider_from_config},
    selection::Dashboard,
};

/// What the dashboard shows. Exactly one of these at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(ViewError),
    Data(Dashboard),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            Self::Data(dash) => Some(dash),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

pub struct Orchestrator {
    /// `None` means no credential was configured.
    provider: Option<Arc<dyn WeatherProvider>>,
    fallback_location: String,
    state: Mutex<ViewState>,
    generation: AtomicU64,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("configured", &self.provider.is_some())
            .field("fallback_location", &self.fallback_location)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self::with_provider(Some(provider))
    }

    /// An orchestrator with no credential; every fetch ends in a configuration error.
    pub fn unconfigured() -> Self {
        Self::with_provider(None)
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = match provider_from_config(config) {
            Ok(provider) => Some(provider),
            Err(err) => {
                tracing::debug!("no weather provider: {err}");
                None
            }
        };

        Self::with_provider(provider).with_fallback_location(config.fallback_location())
    }

    fn with_provider(provider: Option<Arc<dyn WeatherProvider>>) -> Self {
        Self {
            provider,
            fallback_location: DEFAULT_FALLBACK_LOCATION.to_string(),
            state: Mutex::new(ViewState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_fallback_location(mut self, location: impl Into<String>) -> Self {
        self.fallback_location = location.into();
        self
    }

    pub fn fallback_location(&self) -> &str {
        &self.fallback_location
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.lock().clone()
    }

    /// Fetch weather for `query` and return the state this call settled on.
    ///
    /// `Loading` is entered before the request starts. If a newer fetch starts
    /// while this one is in flight, this call's result is dropped and the
    /// returned state is whatever the newer fetch has produced so far.
    pub async fn fetch_weather(&self, query: &str) -> ViewState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(provider) = self.provider.clone() else {
            tracing::error!("API key is missing; not fetching weather for {query:?}");
            *self.state.lock() = ViewState::Error(ViewError::Configuration);
            return self.state();
        };

        *self.state.lock() = ViewState::Loading;
        let guard = LoadingGuard { orchestrator: self, generation, armed: true };
        tracing::info!(query, "fetching weather");

        let next = match provider.forecast(&ForecastRequest::new(query)).await {
            Ok(response) => match Dashboard::from_response(response) {
                Ok(dash) => {
                    tracing::debug!(
                        location = %dash.location().display_name(),
                        days = dash.days().len(),
                        "weather data loaded"
                    );
                    ViewState::Data(dash)
                }
                Err(err) => {
                    tracing::warn!(query, "weather response had no current conditions");
                    ViewState::Error(err)
                }
            },
            Err(err) => {
                tracing::warn!(query, error = ?err, "failed to fetch weather data");
                ViewState::Error(err.into())
            }
        };

        guard.settle(next);
        self.state()
    }

    /// Pick the initial location: device position if available, else the fallback.
    pub async fn initialize(&self, geolocator: &dyn Geolocator) -> ViewState {
        match geolocator.locate().await {
            Ok(coords) => self.fetch_weather(&coords.to_query()).await,
            Err(err) => {
                tracing::info!(
                    fallback = %self.fallback_location,
                    "geolocation failed ({err}), using fallback location"
                );
                let fallback = self.fallback_location.clone();
                self.fetch_weather(&fallback).await
            }
        }
    }

    /// Select a forecast day of the loaded data. Returns `false` when there is
    /// no data or the index is outside the loaded forecast.
    pub fn select_day(&self, index: usize) -> bool {
        match &mut *self.state.lock() {
            ViewState::Data(dash) => dash.select_day(index).is_some(),
            _ => false,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Leaves `Loading` even if the fetch future is dropped before completing.
struct LoadingGuard<'a> {
    orchestrator: &'a Orchestrator,
    generation: u64,
    armed: bool,
}

impl LoadingGuard<'_> {
    fn settle(mut self, next: ViewState) {
        self.armed = false;
        let mut state = self.orchestrator.state.lock();
        if self.orchestrator.is_current(self.generation) {
            *state = next;
        } else {
            tracing::debug!(generation = self.generation, "dropping superseded weather response");
        }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.orchestrator.state.lock();
        if self.orchestrator.is_current(self.generation) && state.is_loading() {
            tracing::debug!("weather fetch cancelled");
            *state = ViewState::Idle;
        }
    }
}
