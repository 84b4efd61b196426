use crate::{theme::ThemePreference, units::UnitPreference};

use super::{Route, ScreenContext, WeatherPanel};

/// Labels for the options menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeMenu {
    pub toggle_unit: String,
    pub toggle_theme: String,
}

/// Landing screen: weather for the device location (or the fallback city),
/// a units/theme menu and the way into search.
#[derive(Debug)]
pub struct HomeScreen {
    panel: WeatherPanel,
}

impl HomeScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            panel: WeatherPanel::new(ctx),
        }
    }

    pub fn panel(&self) -> &WeatherPanel {
        &self.panel
    }

    /// Resolve the device location (or the fallback city) and fetch.
    pub async fn mount(&mut self) {
        self.panel.mount(None).await;
    }

    pub async fn toggle_unit(&mut self) {
        self.panel.toggle_unit().await;
    }

    pub fn toggle_theme(&self) -> ThemePreference {
        self.panel.context().theme.toggle()
    }

    pub fn menu(&self) -> HomeMenu {
        let ctx = self.panel.context();
        let toggle_unit = match ctx.units.get() {
            UnitPreference::Metric => "Switch to °F",
            UnitPreference::Imperial => "Switch to °C",
        };
        let toggle_theme = if ctx.theme.is_dark() {
            "Switch to Light Theme"
        } else {
            "Switch to Dark Theme"
        };

        HomeMenu {
            toggle_unit: toggle_unit.to_string(),
            toggle_theme: toggle_theme.to_string(),
        }
    }

    pub fn open_search(&self) -> Route {
        Route::Search
    }
}
