//! In-memory doubles shared by the unit tests.

use async_trait::async_trait;
use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};
use std::sync::{Arc, Mutex};

use crate::{
    cache::SelectionCache,
    clock::FixedClock,
    error::FetchError,
    icon::DayWindow,
    location::{DEFAULT_FALLBACK_CITY, LocationService},
    model::{CitySearchResult, Coordinates, ForecastEntry, WeatherSnapshot},
    provider::{WeatherClient, WeatherProvider},
    screen::ScreenContext,
    theme::{ThemePreference, ThemeStore},
    units::{UnitPreference, UnitStore},
};

/// Name reported for any coordinate lookup.
pub const COORDS_CITY: &str = "Here";

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: &'static str,
    pub target: String,
    pub unit: UnitPreference,
}

#[derive(Debug, Default)]
pub struct FakeProvider {
    fail: bool,
    search_results: Vec<CitySearchResult>,
    calls: Mutex<Vec<Call>>,
}

impl FakeProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_search_results(search_results: Vec<CitySearchResult>) -> Self {
        Self {
            search_results,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, op: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.op == op).collect()
    }

    fn record(
        &self,
        op: &'static str,
        target: &str,
        unit: UnitPreference,
    ) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(Call {
            op,
            target: target.to_string(),
            unit,
        });
        if self.fail {
            Err(FetchError::Status {
                status: 500,
                body: "boom".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, FetchError> {
        self.record(
            "current_by_coordinates",
            &format!("{},{}", coords.latitude, coords.longitude),
            unit,
        )?;
        Ok(snapshot(COORDS_CITY, unit))
    }

    async fn current_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, FetchError> {
        self.record("current_by_city", name, unit)?;
        Ok(snapshot(name, unit))
    }

    async fn forecast_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Result<Vec<ForecastEntry>, FetchError> {
        self.record("forecast_by_city", name, unit)?;
        Ok(forecast_series())
    }

    async fn search_cities(
        &self,
        query: &str,
        unit: UnitPreference,
    ) -> Result<Vec<CitySearchResult>, FetchError> {
        self.record("search_cities", query, unit)?;
        Ok(self.search_results.clone())
    }
}

/// 20°C or 68°F, depending on what was asked for.
pub fn snapshot(name: &str, unit: UnitPreference) -> WeatherSnapshot {
    let temperature = match unit {
        UnitPreference::Metric => 20.0,
        UnitPreference::Imperial => 68.0,
    };
    WeatherSnapshot {
        location_name: name.to_string(),
        country_code: "FR".to_string(),
        condition_main: "Clouds".to_string(),
        condition_description: "few clouds".to_string(),
        temperature,
        feels_like: temperature - 1.0,
        humidity: 60,
        wind_speed: 3.5,
        sunrise: Some(1_700_000_000),
    }
}

pub fn search_result(id: u64, name: &str, unit: UnitPreference) -> CitySearchResult {
    let snapshot = snapshot(name, unit);
    CitySearchResult {
        id,
        name: name.to_string(),
        country_code: snapshot.country_code.clone(),
        current_temperature: snapshot.temperature,
        condition_description: snapshot.condition_description.clone(),
        snapshot,
    }
}

/// Five noon entries starting 2026-10-18.
pub fn forecast_series() -> Vec<ForecastEntry> {
    let first = NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    (0..5)
        .map(|day| {
            let local_time = first + Duration::days(day);
            ForecastEntry {
                timestamp: local_time.and_utc().timestamp(),
                local_time,
                condition_main: "Clouds".to_string(),
                condition_description: "scattered clouds".to_string(),
                temp_min: 9.4,
                temp_max: 15.6,
            }
        })
        .collect()
}

/// Context at 23:00 UTC on 2026-10-18 (night for day/night icons).
pub fn context(
    provider: Arc<FakeProvider>,
    location: Arc<dyn LocationService>,
) -> ScreenContext {
    let now = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 18, 23, 0, 0)
        .unwrap();

    ScreenContext {
        client: WeatherClient::new(provider),
        units: UnitStore::new(UnitPreference::Metric),
        theme: ThemeStore::from_system(ThemePreference::Light),
        clock: Arc::new(FixedClock(now)),
        location,
        selections: SelectionCache::new(),
        day_window: DayWindow::default(),
        fallback_city: DEFAULT_FALLBACK_CITY.to_string(),
    }
}
