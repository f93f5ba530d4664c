//! Loaded dashboard data plus which forecast day is selected.
//!
//! The selection is an index into the forecast this value owns, so it can
//! never point at a day from an earlier fetch.

use crate::{
    error::ViewError,
    model::{ForecastDay, ForecastResponse, HourSlot, Location, WeatherSnapshot},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    location: Location,
    current: WeatherSnapshot,
    days: Vec<ForecastDay>,
    selected: Option<usize>,
}

impl Dashboard {
    /// Build from a fresh response with the selection on the first day.
    ///
    /// A body without a location or current conditions is [`ViewError::EmptyResult`].
    pub fn from_response(response: ForecastResponse) -> Result<Self, ViewError> {
        let location = response.location.ok_or(ViewError::EmptyResult)?;
        let current = response.current.ok_or(ViewError::EmptyResult)?;
        let days = response.forecast.forecastday;
        let selected = if days.is_empty() { None } else { Some(0) };

        Ok(Self { location, current, days, selected })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn current(&self) -> &WeatherSnapshot {
        &self.current
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_day(&self) -> Option<&ForecastDay> {
        self.selected.and_then(|i| self.days.get(i))
    }

    /// Select the day at `index` of the loaded forecast.
    ///
    /// Indices outside the loaded forecast leave the selection untouched and
    /// return `None`.
    pub fn select_day(&mut self, index: usize) -> Option<&ForecastDay> {
        if index < self.days.len() {
            self.selected = Some(index);
        }
        self.days.get(index)
    }

    /// Select by the day's `date` string, e.g. "2025-05-19".
    pub fn select_date(&mut self, date: &str) -> Option<&ForecastDay> {
        let index = self.days.iter().position(|d| d.date == date)?;
        self.select_day(index)
    }

    /// Hourly slots of the selected day, in upstream order.
    pub fn hours(&self) -> &[HourSlot] {
        self.selected_day().map(|d| d.hour.as_slice()).unwrap_or_default()
    }
}
