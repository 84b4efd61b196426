use std::sync::{Arc, Mutex};

use crate::model::WeatherSnapshot;

/// Identifies which search result was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionId(pub u64);

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands one selected snapshot from the search results to the detail screen.
///
/// Holds at most one entry; storing replaces it and taking empties it.
#[derive(Debug, Clone, Default)]
pub struct SelectionCache {
    slot: Arc<Mutex<Option<(SelectionId, WeatherSnapshot)>>>,
}

impl SelectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, id: SelectionId, snapshot: WeatherSnapshot) {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        *slot = Some((id, snapshot));
    }

    /// Take the snapshot if it was stored under `id`.
    ///
    /// A mismatched id leaves the slot untouched.
    pub fn take(&self, id: SelectionId) -> Option<WeatherSnapshot> {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        let stored = slot.as_ref().map(|(stored, _)| *stored);
        match stored {
            Some(stored) if stored == id => slot.take().map(|(_, snapshot)| snapshot),
            Some(stored) => {
                tracing::debug!(requested = %id, %stored, "selection cache miss");
                None
            }
            None => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap_or_else(|p| p.into_inner()).is_none()
    }
}
