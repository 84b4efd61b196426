use crate::{
    Config,
    error::FetchError,
    model::{CitySearchResult, Coordinates, ForecastEntry, LocationSpec, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
    units::UnitPreference,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Upstream weather API. Each call is a single request with the unit system
/// baked into it.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, FetchError>;

    async fn current_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, FetchError>;

    /// Midday entries only, at most one per calendar date.
    async fn forecast_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Result<Vec<ForecastEntry>, FetchError>;

    /// Up to five matches, most populous first.
    async fn search_cities(
        &self,
        query: &str,
        unit: UnitPreference,
    ) -> Result<Vec<CitySearchResult>, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(Arc::new(OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        &config.base_url,
    )))
}

/// What the screens talk to.
///
/// Every failure is logged and collapsed into "no data": `None` for a
/// snapshot, an empty list otherwise.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherClient {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch_current(
        &self,
        location: &LocationSpec,
        unit: UnitPreference,
    ) -> Option<WeatherSnapshot> {
        match location {
            LocationSpec::Coordinates(coords) => {
                self.fetch_current_by_coordinates(*coords, unit).await
            }
            LocationSpec::City(name) => self.fetch_current_by_city(name, unit).await,
        }
    }

    pub async fn fetch_current_by_coordinates(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Option<WeatherSnapshot> {
        tracing::debug!(
            lat = coords.latitude,
            lon = coords.longitude,
            %unit,
            "fetching current weather"
        );
        match self.provider.current_by_coordinates(coords, unit).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    lat = coords.latitude,
                    lon = coords.longitude,
                    "current weather by coordinates failed"
                );
                None
            }
        }
    }

    pub async fn fetch_current_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Option<WeatherSnapshot> {
        tracing::debug!(city = name, %unit, "fetching current weather");
        match self.provider.current_by_city(name, unit).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, city = name, "current weather by city failed");
                None
            }
        }
    }

    pub async fn fetch_forecast_by_city(
        &self,
        name: &str,
        unit: UnitPreference,
    ) -> Vec<ForecastEntry> {
        tracing::debug!(city = name, %unit, "fetching forecast");
        self.provider
            .forecast_by_city(name, unit)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, city = name, "forecast request failed");
                Vec::new()
            })
    }

    pub async fn search_cities_by_prefix(
        &self,
        query: &str,
        unit: UnitPreference,
    ) -> Vec<CitySearchResult> {
        tracing::debug!(query, %unit, "searching cities");
        self.provider
            .search_cities(query, unit)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, query, "city search failed");
                Vec::new()
            })
    }
}
