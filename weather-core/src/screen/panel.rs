use chrono::Timelike;

use crate::{
    display::{capitalize_first, format_humidity, format_sunrise, format_temperature, format_wind},
    icon::{IconId, resolve_icon},
    location::resolve_initial_location,
    model::{LocationSpec, WeatherSnapshot},
    provider::WeatherClient,
    request::{RequestToken, RequestTracker},
    units::UnitPreference,
};

use super::{ForecastStrip, ScreenContext, ScreenState};

/// A current-weather fetch that has been started but not applied yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub token: RequestToken,
    pub location: LocationSpec,
    pub unit: UnitPreference,
}

impl PendingFetch {
    pub async fn run(&self, client: &WeatherClient) -> Option<WeatherSnapshot> {
        client.fetch_current(&self.location, self.unit).await
    }
}

/// Render-ready text for a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotView {
    pub title: String,
    pub icon: IconId,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub sunrise: String,
}

/// Current conditions plus the forecast strip: the body shared by the home
/// and city detail screens.
#[derive(Debug)]
pub struct WeatherPanel {
    ctx: ScreenContext,
    state: ScreenState<WeatherSnapshot>,
    requests: RequestTracker,
    forecast: ForecastStrip,
}

impl WeatherPanel {
    pub fn new(ctx: ScreenContext) -> Self {
        let forecast = ForecastStrip::new(ctx.clone());
        Self {
            ctx,
            state: ScreenState::Loading,
            requests: RequestTracker::new(),
            forecast,
        }
    }

    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    pub fn state(&self) -> &ScreenState<WeatherSnapshot> {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.state.loaded()
    }

    pub fn forecast(&self) -> &ForecastStrip {
        &self.forecast
    }

    /// Display a snapshot handed over by another screen. In-flight fetches become stale.
    pub fn show(&mut self, snapshot: WeatherSnapshot) {
        self.requests.issue();
        self.state = ScreenState::Loaded(snapshot);
    }

    /// Clear the display and start a fetch for `location` with the current unit.
    pub fn begin_fetch(&mut self, location: LocationSpec) -> PendingFetch {
        self.state = ScreenState::Loading;
        let unit = self.ctx.units.get();
        tracing::debug!(%location, %unit, "loading current weather");
        PendingFetch {
            token: self.requests.issue(),
            location,
            unit,
        }
    }

    /// Apply a finished fetch. Returns `false` if a newer request superseded it.
    pub fn finish_fetch(&mut self, token: RequestToken, result: Option<WeatherSnapshot>) -> bool {
        if !self.requests.is_current(token) {
            tracing::debug!("discarding stale weather response");
            return false;
        }
        self.state = match result {
            Some(snapshot) => ScreenState::Loaded(snapshot),
            None => ScreenState::Empty,
        };
        true
    }

    /// Show `payload` if given, otherwise resolve the device location and fetch.
    /// The forecast strip follows whichever city ends up displayed.
    pub async fn mount(&mut self, payload: Option<WeatherSnapshot>) {
        match payload {
            Some(snapshot) => {
                tracing::debug!(city = %snapshot.location_name, "showing handed-over snapshot");
                self.show(snapshot);
            }
            None => {
                let location =
                    resolve_initial_location(self.ctx.location.as_ref(), &self.ctx.fallback_city)
                        .await;
                self.fetch(location).await;
            }
        }
        self.mount_forecast().await;
    }

    async fn fetch(&mut self, location: LocationSpec) {
        let pending = self.begin_fetch(location);
        let result = pending.run(&self.ctx.client).await;
        self.finish_fetch(pending.token, result);
    }

    async fn mount_forecast(&mut self) {
        let city = self.snapshot().map(|s| s.location_name.clone());
        self.forecast.mount(city.as_deref()).await;
    }

    /// Clear the display, flip the unit and start re-fetching the displayed city.
    ///
    /// Returns `None` when no city is known; the panel is then left empty.
    pub fn begin_unit_toggle(&mut self) -> Option<PendingFetch> {
        let known_city = self.snapshot().map(|s| s.location_name.clone());
        self.state = ScreenState::Loading;
        let unit = self.ctx.units.toggle();
        tracing::info!(%unit, city = ?known_city, "unit toggled");

        match known_city {
            Some(city) => Some(self.begin_fetch(LocationSpec::City(city))),
            None => {
                self.requests.issue();
                self.state = ScreenState::Empty;
                None
            }
        }
    }

    pub async fn toggle_unit(&mut self) {
        if let Some(pending) = self.begin_unit_toggle() {
            let result = pending.run(&self.ctx.client).await;
            self.finish_fetch(pending.token, result);
        }
        if !self.forecast.refresh_on_unit_change().await {
            self.mount_forecast().await;
        }
    }

    pub fn view(&self) -> Option<SnapshotView> {
        let snapshot = self.snapshot()?;
        let unit = self.ctx.units.get();
        let now = self.ctx.clock.now();

        Some(SnapshotView {
            title: format!("{}, {}", snapshot.location_name, snapshot.country_code),
            icon: resolve_icon(
                &snapshot.condition_main,
                Some(snapshot.condition_description.as_str()),
                now.hour(),
                self.ctx.day_window,
            ),
            description: capitalize_first(&snapshot.condition_description),
            temperature: format_temperature(snapshot.temperature, unit),
            feels_like: format!("Feels like: {}", format_temperature(snapshot.feels_like, unit)),
            humidity: format_humidity(snapshot.humidity),
            wind: format_wind(snapshot.wind_speed, unit),
            sunrise: format_sunrise(snapshot.sunrise, now.offset()),
        })
    }
}
