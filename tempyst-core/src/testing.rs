//! Fixtures and a scripted provider shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::HashMap, time::Duration};

use crate::{
    error::ApiError,
    model::{
        Astro, Condition, DayStats, Forecast, ForecastDay, ForecastRequest, ForecastResponse,
        HourSlot, Location, LocationSuggestion, WeatherSnapshot,
    },
    provider::WeatherProvider,
};

const FIRST_DAY_EPOCH: i64 = 1_747_612_800; // 2025-05-19T00:00:00Z

fn condition() -> Condition {
    Condition {
        text: "Partly cloudy".into(),
        icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".into(),
        code: 1003,
    }
}

pub(crate) fn snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        last_updated_epoch: FIRST_DAY_EPOCH + 10 * 3600,
        last_updated: "2025-05-19 10:00".into(),
        temp_c: 18.0,
        temp_f: 64.4,
        is_day: 1,
        condition: condition(),
        wind_mph: 8.1,
        wind_kph: 13.0,
        wind_degree: 240,
        wind_dir: "WSW".into(),
        pressure_mb: 1015.0,
        pressure_in: 29.97,
        precip_mm: 0.0,
        precip_in: 0.0,
        humidity: 63,
        cloud: 50,
        feelslike_c: 18.0,
        feelslike_f: 64.4,
        dewpoint_c: 10.9,
        dewpoint_f: 51.6,
        vis_km: 10.0,
        vis_miles: 6.0,
        uv: 5.0,
        gust_mph: 10.2,
        gust_kph: 16.4,
    }
}

fn hour(day_epoch: i64, date: &str, h: i64) -> HourSlot {
    HourSlot {
        time_epoch: day_epoch + h * 3600,
        time: format!("{date} {h:02}:00"),
        temp_c: 12.0 + h as f64 / 2.0,
        temp_f: 53.6 + h as f64 * 0.9,
        is_day: u8::from((6..21).contains(&h)),
        condition: condition(),
        wind_mph: 6.0,
        wind_kph: 9.7,
        wind_dir: "W".into(),
        pressure_mb: 1016.0,
        pressure_in: 30.0,
        precip_mm: 0.0,
        precip_in: 0.0,
        snow_cm: 0.0,
        humidity: 70,
        cloud: 40,
        feelslike_c: 12.0,
        feelslike_f: 53.6,
        dewpoint_c: 8.0,
        dewpoint_f: 46.4,
        will_it_rain: 0,
        chance_of_rain: 10,
        will_it_snow: 0,
        chance_of_snow: 0,
        vis_km: 10.0,
        vis_miles: 6.0,
        gust_mph: 9.0,
        gust_kph: 14.5,
        uv: 1.0,
        short_rad: 120.0,
        diff_rad: 40.0,
    }
}

fn forecast_day(index: i64) -> ForecastDay {
    let date_epoch = FIRST_DAY_EPOCH + index * 86_400;
    let date = format!("2025-05-{:02}", 19 + index);

    ForecastDay {
        hour: (0..24).map(|h| hour(date_epoch, &date, h)).collect(),
        date,
        date_epoch,
        day: DayStats {
            maxtemp_c: 21.0 + index as f64,
            maxtemp_f: 69.8,
            mintemp_c: 11.0,
            mintemp_f: 51.8,
            avgtemp_c: 16.0,
            avgtemp_f: 60.8,
            maxwind_mph: 11.0,
            maxwind_kph: 17.6,
            totalprecip_mm: 0.4,
            totalprecip_in: 0.02,
            totalsnow_cm: 0.0,
            avgvis_km: 10.0,
            avgvis_miles: 6.0,
            avghumidity: 66.0,
            daily_will_it_rain: 1,
            daily_chance_of_rain: 80,
            daily_will_it_snow: 0,
            daily_chance_of_snow: 0,
            condition: condition(),
            uv: 5.0,
        },
        astro: Astro {
            sunrise: "05:03 AM".into(),
            sunset: "08:52 PM".into(),
            moonrise: "02:05 AM".into(),
            moonset: "10:39 AM".into(),
            moon_phase: "Waning Gibbous".into(),
            moon_illumination: 66.0,
        },
    }
}

/// A response for `name` with `days` forecast days of 24 hours each.
pub(crate) fn sample_response(name: &str, days: usize) -> ForecastResponse {
    ForecastResponse {
        location: Some(Location {
            name: name.into(),
            region: "Region".into(),
            country: "Country".into(),
            lat: 48.87,
            lon: 2.33,
            tz_id: "Europe/Paris".into(),
            localtime_epoch: Some(FIRST_DAY_EPOCH + 10 * 3600),
            localtime: Some("2025-05-19 10:00".into()),
        }),
        current: Some(snapshot()),
        forecast: Forecast { forecastday: (0..days as i64).map(forecast_day).collect() },
    }
}

pub(crate) fn suggestion(id: i64, name: &str) -> LocationSuggestion {
    LocationSuggestion {
        id,
        name: name.into(),
        region: "Ile-de-France".into(),
        country: "France".into(),
        lat: 48.87,
        lon: 2.33,
        url: None,
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    /// Responds with `sample_response(query, 3)`.
    Ok,
    Http(u16, Option<String>),
    /// Well-formed body without `current`.
    NoCurrent,
    /// Well-formed body without `location`.
    NoLocation,
}

/// Provider that records every call and replies from a script.
#[derive(Debug)]
pub(crate) struct MockProvider {
    pub forecast_calls: Mutex<Vec<String>>,
    pub search_calls: Mutex<Vec<String>>,
    forecast_reply: Scripted,
    search_reply: Option<Vec<LocationSuggestion>>,
    delays: HashMap<String, Duration>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            forecast_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
            forecast_reply: Scripted::Ok,
            search_reply: Some(Vec::new()),
            delays: HashMap::new(),
        }
    }

    pub fn with_forecast(mut self, reply: Scripted) -> Self {
        self.forecast_reply = reply;
        self
    }

    /// `None` makes every search fail with a 500.
    pub fn with_search(mut self, reply: Option<Vec<LocationSuggestion>>) -> Self {
        self.search_reply = reply;
        self
    }

    /// Delay replies to `query` by `delay`.
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn forecast_calls(&self) -> Vec<String> {
        self.forecast_calls.lock().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }

    async fn wait_for(&self, query: &str) {
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse, ApiError> {
        self.forecast_calls.lock().push(request.query.clone());
        self.wait_for(&request.query).await;

        match &self.forecast_reply {
            Scripted::Ok => Ok(sample_response(&request.query, usize::from(request.days))),
            Scripted::Http(status, message) => {
                Err(ApiError::Http { status: *status, message: message.clone() })
            }
            Scripted::NoCurrent => {
                let mut resp = sample_response(&request.query, usize::from(request.days));
                resp.current = None;
                Ok(resp)
            }
            Scripted::NoLocation => {
                let mut resp = sample_response(&request.query, usize::from(request.days));
                resp.location = None;
                Ok(resp)
            }
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<LocationSuggestion>, ApiError> {
        self.search_calls.lock().push(query.to_string());
        self.wait_for(query).await;

        self.search_reply
            .clone()
            .ok_or(ApiError::Http { status: 500, message: Some("search unavailable".into()) })
    }
}
