use super::Route;

/// City name input form. No network access.
#[derive(Debug, Clone, Default)]
pub struct SearchScreen {
    input: String,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Route to the results for the trimmed query; blank input goes nowhere.
    pub fn submit(&self) -> Option<Route> {
        let query = self.input.trim();
        if query.is_empty() {
            return None;
        }
        Some(Route::SearchResults {
            query: query.to_string(),
        })
    }
}
