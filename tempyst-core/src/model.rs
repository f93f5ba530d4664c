use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// What the orchestrator asks the upstream forecast endpoint for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    /// Free text, `"lat,lon"`, or a suggestion name.
    pub query: String,
    pub days: u8,
}

impl ForecastRequest {
    /// The dashboard always asks for a 3-day window.
    pub const DAYS: u8 = 3;

    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), days: Self::DAYS }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    #[serde(default)]
    pub localtime_epoch: Option<i64>,
    /// e.g. "2024-05-31 10:30"
    #[serde(default)]
    pub localtime: Option<String>,
}

impl Location {
    /// "name, region, country", skipping empty parts.
    pub fn display_name(&self) -> String {
        join_place(&self.name, &self.region, &self.country)
    }

    /// Wall-clock time at the location, parsed from `localtime`.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        self.localtime.as_deref().and_then(|t| NaiveDateTime::parse_from_str(t, LOCAL_TIME_FORMAT).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Usually protocol-relative, e.g. `//cdn.weatherapi.com/weather/64x64/day/113.png`.
    pub icon: String,
    pub code: i32,
}

/// Point-in-time measurements ("current" in the upstream payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub last_updated_epoch: i64,
    pub last_updated: String,
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(default)]
    pub is_day: u8,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_degree: i32,
    #[serde(default)]
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    #[serde(default)]
    pub dewpoint_c: f64,
    #[serde(default)]
    pub dewpoint_f: f64,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
    pub gust_mph: f64,
    pub gust_kph: f64,
}

/// Aggregated statistics for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_mph: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    #[serde(default)]
    pub totalsnow_cm: f64,
    pub avgvis_km: f64,
    pub avgvis_miles: f64,
    pub avghumidity: f64,
    pub daily_will_it_rain: u8,
    pub daily_chance_of_rain: u8,
    pub daily_will_it_snow: u8,
    pub daily_chance_of_snow: u8,
    pub condition: Condition,
    pub uv: f64,
}

impl DayStats {
    pub fn will_rain(&self) -> bool {
        self.daily_will_it_rain != 0
    }

    pub fn will_snow(&self) -> bool {
        self.daily_will_it_snow != 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    #[serde(default)]
    pub moon_illumination: f64,
}

/// One hour of a forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSlot {
    pub time_epoch: i64,
    /// e.g. "2025-05-19 00:00"
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(default)]
    pub is_day: u8,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    #[serde(default)]
    pub snow_cm: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    #[serde(default)]
    pub dewpoint_c: f64,
    #[serde(default)]
    pub dewpoint_f: f64,
    pub will_it_rain: u8,
    pub chance_of_rain: u8,
    pub will_it_snow: u8,
    pub chance_of_snow: u8,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub gust_mph: f64,
    pub gust_kph: f64,
    pub uv: f64,
    #[serde(default)]
    pub short_rad: f64,
    #[serde(default)]
    pub diff_rad: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// e.g. "2025-05-19"
    pub date: String,
    pub date_epoch: i64,
    pub day: DayStats,
    pub astro: Astro,
    /// 24 slots, midnight to midnight.
    pub hour: Vec<HourSlot>,
}

impl ForecastDay {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl HourSlot {
    /// Local wall-clock time of the slot, parsed from `time`.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.time, LOCAL_TIME_FORMAT).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// Body of the forecast endpoint.
///
/// `location` and `current` are optional: a well-formed body without them is
/// treated as "no data" rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub current: Option<WeatherSnapshot>,
    #[serde(default)]
    pub forecast: Forecast,
}

/// Transient autocomplete candidate from the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub url: Option<String>,
}

impl LocationSuggestion {
    /// "name, region, country", skipping empty parts.
    pub fn label(&self) -> String {
        join_place(&self.name, &self.region, &self.country)
    }
}

fn join_place(name: &str, region: &str, country: &str) -> String {
    [name, region, country].into_iter().filter(|part| !part.is_empty()).collect::<Vec<_>>().join(", ")
}
