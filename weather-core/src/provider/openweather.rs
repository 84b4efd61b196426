use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::collections::HashSet;

use crate::{
    error::FetchError,
    model::{CitySearchResult, Coordinates, ForecastEntry, WeatherSnapshot},
    units::UnitPreference,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Maximum number of city matches requested from `/find`.
const SEARCH_LIMIT: usize = 5;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut query: Vec<(&str, String)>,
        unit: UnitPreference,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        query.push(("units", unit.as_str().to_string()));
        query.push(("appid", self.api_key.clone()));

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    id: u64,
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let (condition_main, condition_description) = first_condition(self.weather);

        WeatherSnapshot {
            location_name: self.name,
            country_code: self.sys.country,
            condition_main,
            condition_description,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            sunrise: self.sys.sunrise,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwFindResponse {
    #[serde(default)]
    list: Vec<OwCurrentResponse>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self
            .get_json(
                "weather",
                vec![
                    ("lat", coords.latitude.to_string()),
                    ("lon", coords.longitude.to_string()),
                ],
                unit,
            )
            .await?;

        Ok(parsed.into_snapshot())
    }

    async fn current_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self
            .get_json("weather", vec![("q", name.to_string())], unit)
            .await?;

        Ok(parsed.into_snapshot())
    }

    async fn forecast_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self
            .get_json("forecast", vec![("q", name.to_string())], unit)
            .await?;

        Ok(midday_entries(parsed.list))
    }

    async fn search_cities(
        &self,
        query: &str,
        unit: UnitPreference,
    ) -> Result<Vec<CitySearchResult>, FetchError> {
        let parsed: OwFindResponse = self
            .get_json(
                "find",
                vec![
                    ("q", query.to_string()),
                    ("type", "like".to_string()),
                    ("sort", "population".to_string()),
                    ("cnt", SEARCH_LIMIT.to_string()),
                ],
                unit,
            )
            .await?;

        let results = parsed
            .list
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|item| {
                let id = item.id;
                let snapshot = item.into_snapshot();
                CitySearchResult {
                    id,
                    name: snapshot.location_name.clone(),
                    country_code: snapshot.country_code.clone(),
                    current_temperature: snapshot.temperature,
                    condition_description: snapshot.condition_description.clone(),
                    snapshot,
                }
            })
            .collect();

        Ok(results)
    }
}

/// Keep the samples taken exactly at local noon, one per date.
fn midday_entries(items: Vec<OwForecastItem>) -> Vec<ForecastEntry> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
    let mut seen_dates = HashSet::new();

    items
        .into_iter()
        .filter_map(|item| {
            let local_time = match NaiveDateTime::parse_from_str(&item.dt_txt, DT_TXT_FORMAT) {
                Ok(t) => t,
                Err(err) => {
                    tracing::debug!(dt_txt = %item.dt_txt, error = %err, "skipping forecast item");
                    return None;
                }
            };

            if local_time.time() != noon || !seen_dates.insert(local_time.date()) {
                return None;
            }

            let (condition_main, condition_description) = first_condition(item.weather);
            Some(ForecastEntry {
                timestamp: item.dt,
                local_time,
                condition_main,
                condition_description,
                temp_min: item.main.temp_min,
                temp_max: item.main.temp_max,
            })
        })
        .collect()
}

fn first_condition(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
