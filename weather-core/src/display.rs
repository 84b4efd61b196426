//! Text formatting shared by the screens.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::units::UnitPreference;

/// Rounded temperature with its unit, e.g. `21°C`.
pub fn format_temperature(value: f64, unit: UnitPreference) -> String {
    format!("{}{}", value.round() as i64, unit.temperature_suffix())
}

/// Wind speed as reported, e.g. `4.1 m/s`.
pub fn format_wind(speed: f64, unit: UnitPreference) -> String {
    format!("{speed} {}", unit.speed_suffix())
}

pub fn format_humidity(humidity: u8) -> String {
    format!("{humidity}%")
}

/// `"light rain"` -> `"Light rain"`; empty input -> `"N/A"`.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "N/A".to_string(),
    }
}

/// Sunrise as `HH:MM` in the given offset, `--:--` when unknown.
pub fn format_sunrise(epoch_seconds: Option<i64>, offset: &FixedOffset) -> String {
    epoch_seconds
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.with_timezone(offset).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Forecast card heading, e.g. `Sun, Oct 18`.
pub fn format_forecast_date(local_time: &NaiveDateTime) -> String {
    local_time.format("%a, %b %-d").to_string()
}
