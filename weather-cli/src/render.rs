use inquire::{
    InquireError, Select, Text,
    ui::{Color, RenderConfig, StyleSheet, Styled},
};
use std::fmt::Display;
use weather_core::{
    Palette,
    screen::{ForecastCard, ResultRow, WeatherPanel},
    theme::hex_to_rgb,
};

fn color(hex: &str) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::Rgb { r, g, b })
        .unwrap_or(Color::White)
}

/// Prompt styling taken from the active palette.
pub fn render_config(palette: &Palette) -> RenderConfig<'static> {
    let primary = color(palette.primary);

    RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(primary))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(primary))
        .with_answer(StyleSheet::new().with_fg(primary))
        .with_help_message(StyleSheet::new().with_fg(color(palette.on_surface_variant)))
}

/// Pick one option. `Ok(None)` means the user backed out (Esc / Ctrl-C).
pub fn choose<T: Display>(
    message: &str,
    options: Vec<T>,
    palette: &Palette,
) -> anyhow::Result<Option<T>> {
    match Select::new(message, options)
        .with_render_config(render_config(palette))
        .prompt()
    {
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Free-text input. `Ok(None)` means the user backed out.
pub fn ask(message: &str, palette: &Palette) -> anyhow::Result<Option<String>> {
    match Text::new(message)
        .with_render_config(render_config(palette))
        .prompt()
    {
        Ok(text) => Ok(Some(text)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub fn print_panel(panel: &WeatherPanel, empty_message: &str) {
    println!();
    match panel.view() {
        Some(view) => {
            println!("{}", view.title);
            println!("  [{}] {}", view.icon, view.description);
            println!("  {}", view.temperature);
            println!("  {}", view.feels_like);
            println!(
                "  Humidity {}   Wind {}   Sunrise {}",
                view.humidity, view.wind, view.sunrise
            );
        }
        None => println!("{empty_message}"),
    }

    print_forecast(&panel.forecast().view());
    println!();
}

fn print_forecast(cards: &[ForecastCard]) {
    if cards.is_empty() {
        return;
    }
    println!();
    for card in cards {
        println!(
            "  {:<12} {:<28} {:<22} {}",
            card.date, card.icon, card.description, card.temperature_range
        );
    }
}

pub fn print_rows(rows: &[ResultRow]) {
    println!();
    for row in rows {
        println!("{}", row.title);
        println!("  {}   {}", row.temperature, row.weather);
    }
    println!();
}
