use crate::{
    Config, ForecastRequest, ForecastResponse, LocationSuggestion,
    error::{ApiError, ViewError},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// Upstream weather data source.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus a multi-day forecast for `request.query`.
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse, ApiError>;

    /// Location candidates for a partially typed query.
    async fn search(&self, query: &str) -> Result<Vec<LocationSuggestion>, ApiError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing key is reported as [`ViewError::Configuration`] so the caller can
/// show it instead of fetching.
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn WeatherProvider>, ViewError> {
    let api_key = config.api_key().ok_or(ViewError::Configuration)?;

    Ok(Arc::new(WeatherApiProvider::with_base_url(api_key.to_owned(), config.base_url())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert_eq!(err, ViewError::Configuration);
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
