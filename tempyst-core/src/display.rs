//! Pure presentation helpers: raw API fields to display strings.

use crate::model::{DayStats, HourSlot, WeatherSnapshot};

/// UV index bucket. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn from_index(uv: f64) -> Self {
        if uv <= 2.0 {
            Self::Low
        } else if uv <= 5.0 {
            Self::Moderate
        } else if uv <= 7.0 {
            Self::High
        } else if uv <= 10.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }

    /// Badge background colour.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#4A90E2",
            Self::Moderate => "#F5A623",
            Self::High => "#F97316",
            Self::VeryHigh => "#DC2626",
            Self::Extreme => "#7E22CE",
        }
    }

    /// Moderate sits on a light badge, everything else on a dark one.
    pub fn dark_text(&self) -> bool {
        matches!(self, Self::Moderate)
    }
}

/// "{uv} - {label}"
pub fn uv_badge(uv: f64) -> String {
    format!("{} - {}", uv, UvLevel::from_index(uv).label())
}

/// Protocol-relative icon URLs (`//host/path`) become `https://host/path`.
pub fn normalize_icon_url(icon: &str) -> String {
    if icon.starts_with("//") { format!("https:{icon}") } else { icon.to_string() }
}

/// Label/value rows for the current conditions panel.
pub fn snapshot_rows(current: &WeatherSnapshot) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Wind", format!("{} mph ({} kph) {}", current.wind_mph, current.wind_kph, current.wind_dir)),
        ("Humidity", format!("{}%", current.humidity)),
        ("Pressure", format!("{} in ({} mb)", current.pressure_in, current.pressure_mb)),
        ("Visibility", format!("{} miles ({} km)", current.vis_miles, current.vis_km)),
        ("Precipitation", format!("{} mm ({} in)", current.precip_mm, current.precip_in)),
        ("Cloud Cover", format!("{}%", current.cloud)),
        ("Dew Point", format!("{}°C ({}°F)", current.dewpoint_c, current.dewpoint_f)),
        ("UV Index", uv_badge(current.uv)),
    ];

    if current.gust_mph > 0.0 {
        rows.push(("Wind Gusts", format!("{} mph ({} kph)", current.gust_mph, current.gust_kph)));
    }

    rows
}

/// One-line summary of a forecast day.
pub fn day_summary(day: &DayStats) -> String {
    let mut parts = vec![
        format!("{}°C / {}°C", day.maxtemp_c, day.mintemp_c),
        day.condition.text.trim().to_string(),
    ];
    if day.will_rain() {
        parts.push(format!("rain {}%", day.daily_chance_of_rain));
    }
    if day.will_snow() {
        parts.push(format!("snow {}%", day.daily_chance_of_snow));
    }
    parts.join(", ")
}

/// "HH:MM" part of an hour slot's "YYYY-MM-DD HH:MM" time.
pub fn hour_label(slot: &HourSlot) -> &str {
    slot.time.split_once(' ').map(|(_, hm)| hm).unwrap_or(&slot.time)
}
