use crate::cache::SelectionId;

use super::{Route, ScreenContext, WeatherPanel};

pub const NO_DATA_MESSAGE: &str = "No weather data available";

/// Detail view for a city picked from the search results.
///
/// Uses the snapshot the results screen left in the selection cache; without
/// one it falls back to the device location like the home screen.
#[derive(Debug)]
pub struct CityScreen {
    panel: WeatherPanel,
}

impl CityScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            panel: WeatherPanel::new(ctx),
        }
    }

    pub fn panel(&self) -> &WeatherPanel {
        &self.panel
    }

    pub async fn mount(&mut self, selection: Option<SelectionId>) {
        let payload = selection.and_then(|id| self.panel.context().selections.take(id));
        if payload.is_none() && selection.is_some() {
            tracing::debug!(?selection, "selection not cached, fetching instead");
        }
        self.panel.mount(payload).await;
    }

    pub async fn toggle_unit(&mut self) {
        self.panel.toggle_unit().await;
    }

    pub fn back_home(&self) -> Route {
        Route::Home
    }

    pub fn empty_message(&self) -> &'static str {
        NO_DATA_MESSAGE
    }
}
