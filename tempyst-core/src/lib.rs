//! Core library for the `tempyst` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client behind the `WeatherProvider` seam
//! - The fetch orchestrator and its `ViewState` (idle/loading/error/data)
//! - Debounced location autocomplete
//! - Forecast day selection and display formatting
//! - The session gate deciding between landing page and dashboard
//!
//! It is used by `tempyst-cli`, but can also back other front ends.

pub mod autocomplete;
pub mod config;
pub mod display;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod selection;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use autocomplete::Autocomplete;
pub use config::Config;
pub use error::{ApiError, ViewError};
pub use geolocation::{Coordinates, FixedGeolocator, GeolocationError, Geolocator};
pub use model::{
    ForecastDay, ForecastRequest, ForecastResponse, HourSlot, Location, LocationSuggestion,
    WeatherSnapshot,
};
pub use orchestrator::{Orchestrator, ViewState};
pub use provider::WeatherProvider;
pub use selection::Dashboard;
pub use session::{SessionProvider, StoredSession, UserIdentity, View};
