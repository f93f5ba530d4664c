use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::DEFAULT_BASE_URL,
    error::ApiError,
    model::{ForecastRequest, ForecastResponse, LocationSuggestion},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// GET `{base}/{endpoint}` and return the body of a successful response.
    async fn get_body(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(
                endpoint,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "WeatherAPI request failed"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: embedded_error_message(&body),
            });
        }

        Ok(body)
    }
}

/// Error envelope WeatherAPI.com returns alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    message: String,
}

fn embedded_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<WaErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse, ApiError> {
        let days = request.days.to_string();
        let body = self
            .get_body(
                "forecast.json",
                &[("q", request.query.as_str()), ("days", days.as_str()), ("aqi", "no"), ("alerts", "no")],
            )
            .await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn search(&self, query: &str) -> Result<Vec<LocationSuggestion>, ApiError> {
        let body = self.get_body("search.json", &[("q", query)]).await?;

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
