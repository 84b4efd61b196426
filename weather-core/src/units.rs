use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, sync::Arc};
use tokio::sync::watch;

/// Measurement system requested from the upstream API.
///
/// The API performs the conversion, so this value travels with every request
/// and is only reinterpreted for suffixes when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

impl UnitPreference {
    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "metric",
            UnitPreference::Imperial => "imperial",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitPreference::Metric => UnitPreference::Imperial,
            UnitPreference::Imperial => UnitPreference::Metric,
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "°C",
            UnitPreference::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "m/s",
            UnitPreference::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitPreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitPreference::Metric),
            "imperial" => Ok(UnitPreference::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Shared unit preference with change notification.
///
/// Clones share the same underlying value. Screens read it with [`UnitStore::get`]
/// and watch for toggles through [`UnitStore::subscribe`].
#[derive(Debug, Clone)]
pub struct UnitStore {
    tx: Arc<watch::Sender<UnitPreference>>,
}

impl UnitStore {
    pub fn new(initial: UnitPreference) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> UnitPreference {
        *self.tx.borrow()
    }

    /// Flip between metric and imperial, returning the new value.
    pub fn toggle(&self) -> UnitPreference {
        self.tx.send_modify(|unit| *unit = unit.toggled());
        let unit = self.get();
        tracing::debug!(%unit, "unit preference toggled");
        unit
    }

    pub fn subscribe(&self) -> watch::Receiver<UnitPreference> {
        self.tx.subscribe()
    }
}

impl Default for UnitStore {
    fn default() -> Self {
        Self::new(UnitPreference::default())
    }
}
