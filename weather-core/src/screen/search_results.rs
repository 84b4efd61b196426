use tokio::sync::watch;

use crate::{
    cache::SelectionId,
    display::format_temperature,
    model::CitySearchResult,
    request::{RequestToken, RequestTracker},
    units::UnitPreference,
};

use super::{Route, ScreenContext, ScreenState};

/// One line in the results list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub id: SelectionId,
    pub title: String,
    pub temperature: String,
    pub weather: String,
}

/// City matches for a query; picking one opens the detail screen.
#[derive(Debug)]
pub struct SearchResultsScreen {
    ctx: ScreenContext,
    query: Option<String>,
    unit: UnitPreference,
    state: ScreenState<Vec<CitySearchResult>>,
    requests: RequestTracker,
    units_rx: watch::Receiver<UnitPreference>,
}

impl SearchResultsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let units_rx = ctx.units.subscribe();
        let unit = ctx.units.get();
        Self {
            ctx,
            query: None,
            unit,
            state: ScreenState::Empty,
            requests: RequestTracker::new(),
            units_rx,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn state(&self) -> &ScreenState<Vec<CitySearchResult>> {
        &self.state
    }

    pub fn begin_load(&mut self, query: &str) -> RequestToken {
        self.units_rx.borrow_and_update();
        self.query = Some(query.to_string());
        self.unit = self.ctx.units.get();
        self.state = ScreenState::Loading;
        self.requests.issue()
    }

    pub fn finish_load(&mut self, token: RequestToken, results: Vec<CitySearchResult>) -> bool {
        if !self.requests.is_current(token) {
            tracing::debug!(query = ?self.query, "discarding stale search response");
            return false;
        }
        tracing::debug!(query = ?self.query, count = results.len(), "search results loaded");
        self.state = if results.is_empty() {
            ScreenState::Empty
        } else {
            ScreenState::Loaded(results)
        };
        true
    }

    pub async fn load(&mut self, query: &str) {
        let token = self.begin_load(query);
        let results = self.ctx.client.search_cities_by_prefix(query, self.unit).await;
        self.finish_load(token, results);
    }

    /// Re-run the current query if the unit preference changed since it was issued.
    pub async fn refresh_on_unit_change(&mut self) -> bool {
        if !matches!(self.units_rx.has_changed(), Ok(true)) {
            return false;
        }
        let Some(query) = self.query.clone() else {
            self.units_rx.borrow_and_update();
            return false;
        };
        self.load(&query).await;
        true
    }

    /// Hand the chosen result's snapshot to the detail screen.
    pub fn select(&self, id: SelectionId) -> Option<Route> {
        let result = self.state.loaded()?.iter().find(|r| r.id == id.0)?;
        self.ctx.selections.store(id, result.snapshot.clone());
        tracing::debug!(city = %result.name, %id, "city selected");
        Some(Route::CityDetail {
            selection: Some(id),
        })
    }

    pub fn rows(&self) -> Vec<ResultRow> {
        let Some(results) = self.state.loaded() else {
            return Vec::new();
        };

        results
            .iter()
            .map(|r| ResultRow {
                id: SelectionId(r.id),
                title: format!("{}, {}", r.name, r.country_code),
                temperature: format!(
                    "Temp: {}",
                    format_temperature(r.current_temperature, self.unit)
                ),
                weather: format!("Weather: {}", r.condition_description),
            })
            .collect()
    }

    pub fn empty_message(&self) -> String {
        format!("No cities found for \"{}\"", self.query.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        location::NoLocation,
        screen::CityScreen,
        testing::{FakeProvider, context, search_result},
    };
    use std::sync::Arc;

    fn paris_and_parma() -> Vec<CitySearchResult> {
        vec![
            search_result(2988507, "Paris", UnitPreference::Metric),
            search_result(3171457, "Parma", UnitPreference::Metric),
        ]
    }

    #[tokio::test]
    async fn load_lists_rows() {
        let fake = Arc::new(FakeProvider::with_search_results(paris_and_parma()));
        let mut screen = SearchResultsScreen::new(context(fake.clone(), Arc::new(NoLocation)));

        screen.load("Par").await;

        let rows = screen.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Paris, FR");
        assert_eq!(rows[0].temperature, "Temp: 20°C");
        assert_eq!(rows[0].weather, "Weather: few clouds");
        assert_eq!(fake.calls_for("search_cities")[0].target, "Par");
    }

    #[tokio::test]
    async fn no_matches_shows_message() {
        let fake = Arc::new(FakeProvider::default());
        let mut screen = SearchResultsScreen::new(context(fake, Arc::new(NoLocation)));

        screen.load("Xyzzy").await;

        assert_eq!(screen.state(), &ScreenState::Empty);
        assert_eq!(screen.empty_message(), "No cities found for \"Xyzzy\"");
    }

    #[tokio::test]
    async fn selecting_paris_opens_detail_without_fetch() {
        let fake = Arc::new(FakeProvider::with_search_results(paris_and_parma()));
        let ctx = context(fake.clone(), Arc::new(NoLocation));
        let mut results = SearchResultsScreen::new(ctx.clone());
        results.load("Par").await;

        let route = results.select(SelectionId(2988507)).expect("known result");
        let Route::CityDetail { selection } = &route else {
            panic!("expected city detail route, got {route:?}");
        };

        let before = fake.calls().len();
        let mut city = CityScreen::new(ctx);
        city.mount(*selection).await;

        assert_eq!(city.panel().view().unwrap().title, "Paris, FR");
        assert!(fake.calls_for("current_by_city").is_empty());
        assert!(fake.calls_for("current_by_coordinates").is_empty());
        // Only the forecast strip goes to the network.
        let after: Vec<_> = fake.calls().into_iter().skip(before).map(|c| c.op).collect();
        assert_eq!(after, vec!["forecast_by_city"]);
    }

    #[tokio::test]
    async fn unknown_selection_does_not_navigate() {
        let fake = Arc::new(FakeProvider::with_search_results(paris_and_parma()));
        let mut screen = SearchResultsScreen::new(context(fake, Arc::new(NoLocation)));
        screen.load("Par").await;

        assert_eq!(screen.select(SelectionId(1)), None);
    }

    #[tokio::test]
    async fn unit_change_reruns_query() {
        let fake = Arc::new(FakeProvider::with_search_results(paris_and_parma()));
        let ctx = context(fake.clone(), Arc::new(NoLocation));
        let units = ctx.units.clone();
        let mut screen = SearchResultsScreen::new(ctx);
        screen.load("Par").await;

        units.toggle();
        assert!(screen.refresh_on_unit_change().await);
        assert!(!screen.refresh_on_unit_change().await);

        let calls = fake.calls_for("search_cities");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].unit, UnitPreference::Imperial);
        assert_eq!(calls[1].target, "Par");
    }

    #[test]
    fn stale_search_is_discarded() {
        let fake = Arc::new(FakeProvider::default());
        let mut screen = SearchResultsScreen::new(context(fake, Arc::new(NoLocation)));

        let old = screen.begin_load("Pa");
        let new = screen.begin_load("Par");

        assert!(screen.finish_load(new, paris_and_parma()));
        assert!(!screen.finish_load(old, Vec::new()));
        assert_eq!(screen.rows().len(), 2);
        assert_eq!(screen.query(), Some("Par"));
    }
}
