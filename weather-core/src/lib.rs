//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and the fail-soft facade the screens use
//! - Icon resolution, unit and theme preferences
//! - Screen controllers (home, city detail, search, search results, forecast)
//!
//! It is used by `weather-cli`, but the controllers carry no terminal code and
//! can drive any front end.

pub mod cache;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;
pub mod request;
pub mod screen;
pub mod theme;
pub mod units;

#[cfg(test)]
mod testing;

pub use cache::{SelectionCache, SelectionId};
pub use config::Config;
pub use error::{FetchError, LocationError};
pub use icon::{DayWindow, IconId, resolve_icon};
pub use location::{FixedLocation, LocationService, NoLocation, PermissionStatus};
pub use model::{CitySearchResult, Coordinates, ForecastEntry, LocationSpec, WeatherSnapshot};
pub use provider::{WeatherClient, WeatherProvider, provider_from_config};
pub use screen::{Navigator, Route, ScreenContext, ScreenState};
pub use theme::{Palette, ThemePreference, ThemeStore};
pub use units::{UnitPreference, UnitStore};
