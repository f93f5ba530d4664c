//! Terminal rendering of the dashboard views.

use chrono::Timelike;
use tempyst_core::{
    Dashboard, ForecastDay, UserIdentity, ViewState,
    display::{self, UvLevel},
    session,
};

pub fn header(user: Option<&UserIdentity>) {
    println!("Tempyst  |  {}", session::greeting(user));
    println!();
}

pub fn landing() {
    println!("Instant, Accurate Weather Forecasts");
    println!();
    println!("Get real-time weather data and personalized forecasts.");
    println!("Plan your day with confidence, no matter the weather.");
    println!();
    println!("  * Real-Time Forecasts: temperature, humidity and wind for any location.");
    println!("  * Location Search: find any city as you type.");
    println!("  * 3-Day Outlook: daily highs and lows with an hour-by-hour view.");
    println!();
    println!("Sign in to get started: tempyst sign-in");
}

pub fn view_state(state: &ViewState) {
    match state {
        ViewState::Idle => println!("Nothing loaded yet."),
        ViewState::Loading => println!("Loading weather data..."),
        ViewState::Error(err) => {
            println!("Error: {err}");
            if let Some(hint) = err.hint() {
                println!("{hint}");
            }
        }
        ViewState::Data(dash) => dashboard(dash),
    }
}

fn dashboard(dash: &Dashboard) {
    let location = dash.location();
    let current = dash.current();

    println!("{}", location.name);
    println!("{}, {}", location.region, location.country);
    if let Some(local) = location.local_time() {
        println!("Location Time: {}", local.format("%A, %B %-d, %Y %H:%M"));
    }
    println!();

    println!("{}°F  {}", current.temp_f, current.condition.text.trim());
    println!("Feels like {}°F", current.feelslike_f);
    println!("Icon: {}", display::normalize_icon_url(&current.condition.icon));
    println!();

    for (label, value) in display::snapshot_rows(current) {
        if label == "UV Index" {
            println!("  {label:<14} {}", uv_badge(current.uv, &value));
        } else {
            println!("  {label:<14} {value}");
        }
    }
    if UvLevel::from_index(current.uv) >= UvLevel::High {
        println!("  Protect your skin: UV is {}.", UvLevel::from_index(current.uv).label());
    }
    println!();

    println!("3 Day Forecast");
    for (index, day) in dash.days().iter().enumerate() {
        let marker = if dash.selected_index() == Some(index) { '>' } else { ' ' };
        println!("{marker} [{index}] {}  {}", format_date(day), display::day_summary(&day.day));
    }

    if let Some(day) = dash.selected_day() {
        println!();
        println!("Hourly for {}  (sunrise {}, sunset {})", format_date(day), day.astro.sunrise, day.astro.sunset);
        let now = location.local_time();
        for slot in dash.hours() {
            // Mark the slot covering the location's current hour.
            let is_now = match (now, slot.local_time()) {
                (Some(now), Some(at)) => now.date() == at.date() && now.hour() == at.hour(),
                _ => false,
            };
            println!(
                "{} {}  {:>5}°C  {:<24} rain {:>3}%  snow {:>3}%  UV {}",
                if is_now { '*' } else { ' ' },
                display::hour_label(slot),
                slot.temp_c,
                slot.condition.text.trim(),
                slot.chance_of_rain,
                slot.chance_of_snow,
                slot.uv,
            );
        }
    }

    println!();
    println!("Weather data last updated: {}", current.last_updated);
    println!("Powered by WeatherAPI.com");
}

/// Value painted on the level's badge colour (24-bit ANSI).
fn uv_badge(uv: f64, text: &str) -> String {
    let level = UvLevel::from_index(uv);
    let hex = level.color().trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());

    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => {
            let fg = if level.dark_text() { 30 } else { 97 };
            format!("\x1b[48;2;{r};{g};{b}m\x1b[{fg}m {text} \x1b[0m")
        }
        _ => text.to_string(),
    }
}

fn format_date(day: &ForecastDay) -> String {
    day.calendar_date()
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|| day.date.clone())
}
