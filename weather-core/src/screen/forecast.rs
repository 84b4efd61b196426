use chrono::Timelike;
use tokio::sync::watch;

use crate::{
    display::{format_forecast_date, format_temperature},
    icon::{IconId, resolve_icon},
    model::ForecastEntry,
    request::{RequestToken, RequestTracker},
    units::UnitPreference,
};

use super::{ScreenContext, ScreenState};

/// One day in the forecast strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub date: String,
    pub icon: IconId,
    pub description: String,
    pub temperature_range: String,
}

/// 5-day strip embedded in the home and city screens, keyed by city name.
#[derive(Debug)]
pub struct ForecastStrip {
    ctx: ScreenContext,
    city: Option<String>,
    unit: UnitPreference,
    state: ScreenState<Vec<ForecastEntry>>,
    requests: RequestTracker,
    units_rx: watch::Receiver<UnitPreference>,
}

impl ForecastStrip {
    pub fn new(ctx: ScreenContext) -> Self {
        let units_rx = ctx.units.subscribe();
        let unit = ctx.units.get();
        Self {
            ctx,
            city: None,
            unit,
            state: ScreenState::Loading,
            requests: RequestTracker::new(),
            units_rx,
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<ForecastEntry>> {
        &self.state
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Start loading `city` with the current unit. Any earlier request becomes stale.
    pub fn begin_load(&mut self, city: &str) -> RequestToken {
        self.units_rx.borrow_and_update();
        self.city = Some(city.to_string());
        self.unit = self.ctx.units.get();
        self.state = ScreenState::Loading;
        self.requests.issue()
    }

    pub fn finish_load(&mut self, token: RequestToken, entries: Vec<ForecastEntry>) -> bool {
        if !self.requests.is_current(token) {
            tracing::debug!(city = ?self.city, "discarding stale forecast response");
            return false;
        }
        self.state = if entries.is_empty() {
            ScreenState::Empty
        } else {
            ScreenState::Loaded(entries)
        };
        true
    }

    /// Fetch the strip for `city`; with no city there is nothing to show.
    pub async fn mount(&mut self, city: Option<&str>) {
        let Some(city) = city else {
            self.city = None;
            self.requests.issue();
            self.state = ScreenState::Empty;
            return;
        };

        let token = self.begin_load(city);
        let entries = self.ctx.client.fetch_forecast_by_city(city, self.unit).await;
        self.finish_load(token, entries);
    }

    /// Re-fetch when the unit preference changed since the last load.
    pub async fn refresh_on_unit_change(&mut self) -> bool {
        if !matches!(self.units_rx.has_changed(), Ok(true)) {
            return false;
        }
        let Some(city) = self.city.clone() else {
            self.units_rx.borrow_and_update();
            return false;
        };
        self.mount(Some(city.as_str())).await;
        true
    }

    /// Cards for the loaded days. Icons use each entry's own local hour.
    pub fn view(&self) -> Vec<ForecastCard> {
        let Some(entries) = self.state.loaded() else {
            return Vec::new();
        };

        entries
            .iter()
            .map(|entry| ForecastCard {
                date: format_forecast_date(&entry.local_time),
                icon: resolve_icon(
                    &entry.condition_main,
                    Some(entry.condition_description.as_str()),
                    entry.local_time.hour(),
                    self.ctx.day_window,
                ),
                description: entry.condition_description.clone(),
                temperature_range: format!(
                    "{} / {}",
                    format_temperature(entry.temp_min, self.unit),
                    format_temperature(entry.temp_max, self.unit)
                ),
            })
            .collect()
    }
}
