//! Screen controllers.
//!
//! Each controller owns its loading/loaded/empty state, talks to the weather
//! client through a [`ScreenContext`] and answers user actions with a
//! [`Route`] when navigation should happen. Rendering is left to the front end;
//! controllers only produce view models.

use std::sync::Arc;

use crate::{
    Config,
    cache::{SelectionCache, SelectionId},
    clock::Clock,
    icon::DayWindow,
    location::LocationService,
    provider::WeatherClient,
    theme::ThemeStore,
    units::UnitStore,
};

pub mod city;
pub mod forecast;
pub mod home;
pub mod panel;
pub mod search;
pub mod search_results;

pub use city::CityScreen;
pub use forecast::{ForecastCard, ForecastStrip};
pub use home::{HomeMenu, HomeScreen};
pub use panel::{PendingFetch, SnapshotView, WeatherPanel};
pub use search::SearchScreen;
pub use search_results::{ResultRow, SearchResultsScreen};

/// Display state shared by every screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenState<T> {
    #[default]
    Loading,
    Loaded(T),
    Empty,
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ScreenState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search,
    SearchResults { query: String },
    CityDetail { selection: Option<SelectionId> },
}

/// Stack of visited routes; the root is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Route {
        // The stack always keeps its root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!(?route, "navigate");
        self.stack.push(route);
    }

    /// Pop the current route. Returns `None` when already at the root.
    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    pub fn reset(&mut self, root: Route) {
        self.stack.clear();
        self.stack.push(root);
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Everything a screen needs, passed in rather than reached for globally.
#[derive(Debug, Clone)]
pub struct ScreenContext {
    pub client: WeatherClient,
    pub units: UnitStore,
    pub theme: ThemeStore,
    pub clock: Arc<dyn Clock>,
    pub location: Arc<dyn LocationService>,
    pub selections: SelectionCache,
    pub day_window: DayWindow,
    pub fallback_city: String,
}

impl ScreenContext {
    /// Build a context from loaded configuration and the runtime services.
    pub fn from_config(
        config: &Config,
        client: WeatherClient,
        theme: ThemeStore,
        clock: Arc<dyn Clock>,
        location: Arc<dyn LocationService>,
    ) -> Self {
        Self {
            client,
            units: UnitStore::new(config.units),
            theme,
            clock,
            location,
            selections: SelectionCache::new(),
            day_window: config.day_window,
            fallback_city: config.fallback_city.clone(),
        }
    }
}
