use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::sync::Arc;
use weather_core::{
    Config, FixedLocation, LocationService, NoLocation, Route, ScreenContext, ThemePreference,
    ThemeStore, UnitPreference, WeatherClient, clock::system_clock, provider_from_config,
    theme::detect_system_theme,
};

use crate::session::Session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Unit system for this session: "metric" or "imperial".
    #[arg(long, global = true, value_parser = parse_units)]
    pub units: Option<UnitPreference>,

    /// Color theme: "light" or "dark". Defaults to the terminal's scheme.
    #[arg(long, global = true, value_parser = parse_theme)]
    pub theme: Option<ThemePreference>,

    /// Latitude of the current position.
    #[arg(long, global = true, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position.
    #[arg(long, global = true, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// City to show when no position is given.
    #[arg(long, global = true)]
    pub city: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the home screen with weather for the current position (default).
    Home,

    /// Search cities matching a name.
    Search {
        /// City name or prefix.
        query: String,
    },

    /// Store the OpenWeather API key and default units.
    Configure,
}

fn parse_units(value: &str) -> Result<UnitPreference, String> {
    UnitPreference::try_from(value).map_err(|e| e.to_string())
}

fn parse_theme(value: &str) -> Result<ThemePreference, String> {
    ThemePreference::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.clone().unwrap_or(Command::Home) {
            Command::Configure => configure(),
            Command::Home => {
                let ctx = self.context()?;
                Session::new(ctx, Route::Home).run().await
            }
            Command::Search { query } => {
                let query = query.trim().to_string();
                if query.is_empty() {
                    anyhow::bail!("Search query must not be blank.");
                }
                let ctx = self.context()?;
                Session::new(ctx, Route::SearchResults { query }).run().await
            }
        }
    }

    fn context(&self) -> anyhow::Result<ScreenContext> {
        let mut config = Config::load()?;
        if let Some(units) = self.units {
            config.units = units;
        }
        if let Some(city) = &self.city {
            config.fallback_city = city.clone();
        }

        let provider = provider_from_config(&config)?;

        let theme = match self.theme.or(config.theme) {
            Some(theme) => ThemeStore::pinned(theme),
            None => ThemeStore::from_system(detect_system_theme()),
        };

        let location: Arc<dyn LocationService> = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Arc::new(FixedLocation::new(lat, lon)),
            _ => Arc::new(NoLocation),
        };

        tracing::debug!(units = %config.units, theme = %theme.get(), "starting session");

        Ok(ScreenContext::from_config(
            &config,
            WeatherClient::new(provider),
            theme,
            system_clock(),
            location,
        ))
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let units = Select::new(
        "Default units:",
        vec![UnitPreference::Metric, UnitPreference::Imperial],
    )
    .prompt()
    .context("Failed to read unit choice")?;

    let fallback_city = Text::new("Fallback city:")
        .with_default(&config.fallback_city)
        .prompt()
        .context("Failed to read fallback city")?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.api_key = Some(api_key.to_string());
    }
    config.units = units;
    if !fallback_city.trim().is_empty() {
        config.fallback_city = fallback_city.trim().to_string();
    }
    config.save()?;

    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_global_flags() {
        let cli = Cli::try_parse_from([
            "weather", "--units", "imperial", "search", "Paris", "--theme", "dark",
        ])
        .unwrap();

        assert_eq!(cli.units, Some(UnitPreference::Imperial));
        assert_eq!(cli.theme, Some(ThemePreference::Dark));
        assert!(matches!(cli.command, Some(Command::Search { ref query }) if query == "Paris"));
    }

    #[test]
    fn negative_coordinates_are_accepted() {
        let cli = Cli::try_parse_from(["weather", "--lat", "-33.87", "--lon", "151.21"]).unwrap();
        assert_eq!(cli.lat, Some(-33.87));
        assert_eq!(cli.lon, Some(151.21));
        assert!(cli.command.is_none());
    }

    #[test]
    fn latitude_requires_longitude() {
        assert!(Cli::try_parse_from(["weather", "--lat", "51.5"]).is_err());
    }

    #[test]
    fn unknown_units_rejected() {
        assert!(Cli::try_parse_from(["weather", "--units", "kelvin"]).is_err());
    }
}
