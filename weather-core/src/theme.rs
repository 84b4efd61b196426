use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            ThemePreference::Light => &Palette::LIGHT,
            ThemePreference::Dark => &Palette::DARK,
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ThemePreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(anyhow::anyhow!(
                "Unknown theme '{value}'. Supported themes: light, dark."
            )),
        }
    }
}

/// Color roles used by the front end, as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub primary_container: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub surface_variant: &'static str,
    pub on_surface: &'static str,
    pub on_surface_variant: &'static str,
    pub outline: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        primary: "#87CEEB",
        primary_container: "#E3F2FD",
        background: "#f0f8ff",
        surface: "#FFFFFF",
        surface_variant: "#F5F5F5",
        on_surface: "#000000",
        on_surface_variant: "#666666",
        outline: "#CCCCCC",
    };

    pub const DARK: Palette = Palette {
        primary: "#4FC3F7",
        primary_container: "#87CEEB",
        background: "#121212",
        surface: "#1E1E1E",
        surface_variant: "#2D2D2D",
        on_surface: "#FFFFFF",
        on_surface_variant: "#CCCCCC",
        outline: "#444444",
    };
}

/// Split a `#RRGGBB` color into its channels.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Guess the terminal's light/dark setting from a `COLORFGBG` value
/// (`"fg;bg"` or `"fg;default;bg"`).
pub fn scheme_from_colorfgbg(value: Option<&str>) -> ThemePreference {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());

    match background {
        Some(0..=6) | Some(8) => ThemePreference::Dark,
        _ => ThemePreference::Light,
    }
}

/// System color scheme of the running terminal.
pub fn detect_system_theme() -> ThemePreference {
    let value = std::env::var("COLORFGBG").ok();
    scheme_from_colorfgbg(value.as_deref())
}

/// Shared light/dark selection.
///
/// Starts from the system scheme and follows system changes until the user
/// toggles once; after that only [`ThemeStore::toggle`] changes it.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    tx: Arc<watch::Sender<ThemePreference>>,
    user_controlled: Arc<AtomicBool>,
}

impl ThemeStore {
    pub fn from_system(system: ThemePreference) -> Self {
        let (tx, _rx) = watch::channel(system);
        Self {
            tx: Arc::new(tx),
            user_controlled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A store pinned to an explicit choice (e.g. from config or a flag).
    pub fn pinned(theme: ThemePreference) -> Self {
        let store = Self::from_system(theme);
        store.user_controlled.store(true, Ordering::SeqCst);
        store
    }

    pub fn get(&self) -> ThemePreference {
        *self.tx.borrow()
    }

    pub fn is_dark(&self) -> bool {
        self.get() == ThemePreference::Dark
    }

    pub fn palette(&self) -> &'static Palette {
        self.get().palette()
    }

    pub fn toggle(&self) -> ThemePreference {
        self.user_controlled.store(true, Ordering::SeqCst);
        self.tx.send_modify(|theme| *theme = theme.toggled());
        let theme = self.get();
        tracing::debug!(%theme, "theme toggled");
        theme
    }

    /// Apply a system scheme change. Returns `false` once the user has taken over.
    pub fn on_system_change(&self, system: ThemePreference) -> bool {
        if self.user_controlled.load(Ordering::SeqCst) {
            tracing::debug!(%system, "ignoring system theme change after user toggle");
            return false;
        }
        self.tx.send_if_modified(|theme| {
            let changed = *theme != system;
            *theme = system;
            changed
        });
        true
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemePreference> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_match_theme() {
        assert_eq!(ThemePreference::Light.palette().primary, "#87CEEB");
        assert_eq!(ThemePreference::Dark.palette().primary, "#4FC3F7");
        assert_eq!(ThemePreference::Dark.palette().background, "#121212");
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#87CEEB"), Some((0x87, 0xCE, 0xEB)));
        assert_eq!(hex_to_rgb("#f0f8ff"), Some((0xF0, 0xF8, 0xFF)));
        assert_eq!(hex_to_rgb("87CEEB"), None);
        assert_eq!(hex_to_rgb("#12"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn colorfgbg_detection() {
        assert_eq!(scheme_from_colorfgbg(Some("15;0")), ThemePreference::Dark);
        assert_eq!(scheme_from_colorfgbg(Some("15;default;8")), ThemePreference::Dark);
        assert_eq!(scheme_from_colorfgbg(Some("0;15")), ThemePreference::Light);
        assert_eq!(scheme_from_colorfgbg(Some("garbage")), ThemePreference::Light);
        assert_eq!(scheme_from_colorfgbg(None), ThemePreference::Light);
    }

    #[test]
    fn follows_system_until_user_toggles() {
        let store = ThemeStore::from_system(ThemePreference::Light);

        assert!(store.on_system_change(ThemePreference::Dark));
        assert!(store.is_dark());

        assert_eq!(store.toggle(), ThemePreference::Light);

        assert!(!store.on_system_change(ThemePreference::Dark));
        assert_eq!(store.get(), ThemePreference::Light);
    }

    #[test]
    fn pinned_store_ignores_system() {
        let store = ThemeStore::pinned(ThemePreference::Dark);
        assert!(!store.on_system_change(ThemePreference::Light));
        assert_eq!(store.palette(), &Palette::DARK);
    }

    #[test]
    fn subscribers_observe_toggle() {
        let store = ThemeStore::from_system(ThemePreference::Dark);
        let mut rx = store.subscribe();

        store.toggle();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ThemePreference::Light);
    }
}
