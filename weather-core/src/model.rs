use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A point-in-time reading for one location.
///
/// Temperatures and wind speed are in whatever unit system the request asked
/// for; the snapshot itself does not record it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country_code: String,
    pub condition_main: String,
    pub condition_description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Unix seconds; `/find` results do not carry it.
    pub sunrise: Option<i64>,
}

/// One day's midday sample from the 3-hour forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: i64,
    /// Location-local time as reported by the upstream `dt_txt` field.
    pub local_time: NaiveDateTime,
    pub condition_main: String,
    pub condition_description: String,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// A match from the city search, carrying its full current-weather payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySearchResult {
    pub id: u64,
    pub name: String,
    pub country_code: String,
    pub current_temperature: f64,
    pub condition_description: String,
    pub snapshot: WeatherSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where to look up current weather.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSpec {
    Coordinates(Coordinates),
    City(String),
}

impl std::fmt::Display for LocationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationSpec::Coordinates(c) => write!(f, "{:.4},{:.4}", c.latitude, c.longitude),
            LocationSpec::City(name) => f.write_str(name),
        }
    }
}
