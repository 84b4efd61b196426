//! Mapping from weather conditions to symbolic icon names.
//!
//! Resolution is total: unknown conditions and descriptions fall back to a
//! default instead of failing.

use serde::{Deserialize, Serialize};

/// Symbolic icon name, e.g. `weather-sunny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(&'static str);

impl IconId {
    pub const SUNNY: IconId = IconId("weather-sunny");
    pub const PARTLY_CLOUDY: IconId = IconId("weather-partly-cloudy");
    pub const NIGHT_PARTLY_CLOUDY: IconId = IconId("weather-night-partly-cloudy");
    pub const CLOUDY: IconId = IconId("weather-cloudy");
    pub const RAINY: IconId = IconId("weather-rainy");
    pub const SNOWY: IconId = IconId("weather-snowy");
    pub const LIGHTNING: IconId = IconId("weather-lightning");
    pub const FOG: IconId = IconId("weather-fog");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.0)
    }
}

/// Hours strictly between `start` and `end` count as daytime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: u32,
    pub end: u32,
}

impl DayWindow {
    pub fn is_daytime(&self, hour: u32) -> bool {
        hour > self.start && hour < self.end
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self { start: 6, end: 20 }
    }
}

/// Icon for a description that has separate day and night artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Fixed(IconId),
    DayNight { day: IconId, night: IconId },
}

impl Variant {
    fn pick(&self, daytime: bool) -> IconId {
        match *self {
            Variant::Fixed(icon) => icon,
            Variant::DayNight { day, night } => {
                if daytime {
                    day
                } else {
                    night
                }
            }
        }
    }
}

/// A row of the icon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconEntry {
    Direct(IconId),
    Conditioned {
        variants: &'static [(&'static str, Variant)],
        default: IconId,
    },
}

const PARTLY_CLOUDY: Variant = Variant::DayNight {
    day: IconId::PARTLY_CLOUDY,
    night: IconId::NIGHT_PARTLY_CLOUDY,
};

const CLOUD_VARIANTS: &[(&str, Variant)] = &[
    ("few clouds", PARTLY_CLOUDY),
    ("scattered clouds", PARTLY_CLOUDY),
    ("broken clouds", PARTLY_CLOUDY),
    ("overcast clouds", Variant::Fixed(IconId::CLOUDY)),
];

pub const ICON_TABLE: &[(&str, IconEntry)] = &[
    ("Clear", IconEntry::Direct(IconId::SUNNY)),
    (
        "Clouds",
        IconEntry::Conditioned {
            variants: CLOUD_VARIANTS,
            default: IconId::CLOUDY,
        },
    ),
    ("Rain", IconEntry::Direct(IconId::RAINY)),
    ("Snow", IconEntry::Direct(IconId::SNOWY)),
    ("Thunderstorm", IconEntry::Direct(IconId::LIGHTNING)),
    ("Drizzle", IconEntry::Direct(IconId::RAINY)),
    ("Mist", IconEntry::Direct(IconId::FOG)),
];

pub const DEFAULT_ICON: IconId = IconId::CLOUDY;

pub fn resolve_icon(
    condition_main: &str,
    condition_description: Option<&str>,
    hour: u32,
    window: DayWindow,
) -> IconId {
    let Some((_, entry)) = ICON_TABLE.iter().find(|(main, _)| *main == condition_main) else {
        return DEFAULT_ICON;
    };

    match entry {
        IconEntry::Direct(icon) => *icon,
        IconEntry::Conditioned { variants, default } => {
            let description = condition_description.map(str::to_lowercase);
            description
                .and_then(|d| {
                    variants
                        .iter()
                        .find(|(known, _)| *known == d)
                        .map(|(_, variant)| variant.pick(window.is_daytime(hour)))
                })
                .unwrap_or(*default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: DayWindow = DayWindow { start: 6, end: 20 };

    #[test]
    fn every_known_condition_resolves() {
        for (main, entry) in ICON_TABLE {
            match entry {
                IconEntry::Direct(expected) => {
                    assert_eq!(resolve_icon(main, None, 12, WINDOW), *expected);
                }
                IconEntry::Conditioned { variants, .. } => {
                    for (description, _) in *variants {
                        for hour in 0..24 {
                            let icon = resolve_icon(main, Some(*description), hour, WINDOW);
                            assert!(!icon.as_str().is_empty());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn unknown_condition_uses_global_default() {
        assert_eq!(resolve_icon("Tornado", Some("tornado"), 12, WINDOW), DEFAULT_ICON);
        assert_eq!(resolve_icon("", None, 3, WINDOW), DEFAULT_ICON);
    }

    #[test]
    fn overcast_is_cloudy_at_every_hour() {
        for hour in 0..24 {
            assert_eq!(
                resolve_icon("Clouds", Some("overcast clouds"), hour, WINDOW),
                IconId::CLOUDY
            );
        }
    }

    #[test]
    fn partly_cloudy_swaps_for_night() {
        assert_eq!(
            resolve_icon("Clouds", Some("few clouds"), 12, WINDOW),
            IconId::PARTLY_CLOUDY
        );
        assert_eq!(
            resolve_icon("Clouds", Some("Scattered Clouds"), 23, WINDOW),
            IconId::NIGHT_PARTLY_CLOUDY
        );
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let window = DayWindow { start: 6, end: 18 };
        assert!(!window.is_daytime(6));
        assert!(window.is_daytime(7));
        assert!(window.is_daytime(17));
        assert!(!window.is_daytime(18));
        assert_eq!(
            resolve_icon("Clouds", Some("broken clouds"), 19, window),
            IconId::NIGHT_PARTLY_CLOUDY
        );
        assert_eq!(
            resolve_icon("Clouds", Some("broken clouds"), 19, WINDOW),
            IconId::PARTLY_CLOUDY
        );
    }

    #[test]
    fn unknown_cloud_description_uses_category_default() {
        assert_eq!(resolve_icon("Clouds", Some("fluffy"), 12, WINDOW), IconId::CLOUDY);
        assert_eq!(resolve_icon("Clouds", None, 12, WINDOW), IconId::CLOUDY);
    }

    #[test]
    fn drizzle_and_rain_share_icon() {
        assert_eq!(resolve_icon("Drizzle", None, 0, WINDOW), IconId::RAINY);
        assert_eq!(resolve_icon("Rain", Some("heavy rain"), 0, WINDOW), IconId::RAINY);
    }
}
