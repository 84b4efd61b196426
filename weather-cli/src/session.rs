use std::fmt;
use weather_core::{
    Navigator, Route, ScreenContext, SelectionId, UnitPreference,
    screen::{
        CityScreen, HomeScreen, ResultRow, SearchResultsScreen, SearchScreen,
        city::NO_DATA_MESSAGE,
    },
    theme::detect_system_theme,
};

use crate::render;

/// What to do with the navigation stack after a screen returns.
enum Step {
    Push(Route),
    Back,
    Home,
    Quit,
}

enum HomeChoice {
    ToggleUnit(String),
    ToggleTheme(String),
    Search,
    Quit,
}

impl fmt::Display for HomeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeChoice::ToggleUnit(label) | HomeChoice::ToggleTheme(label) => f.write_str(label),
            HomeChoice::Search => f.write_str("Search City"),
            HomeChoice::Quit => f.write_str("Quit"),
        }
    }
}

enum CityChoice {
    ToggleUnit(UnitPreference),
    BackHome,
}

impl fmt::Display for CityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityChoice::ToggleUnit(unit) => {
                write!(f, "Switch to {}", unit.toggled().temperature_suffix())
            }
            CityChoice::BackHome => f.write_str("Back to Home"),
        }
    }
}

enum ResultChoice {
    City(ResultRow),
    ToggleUnit(UnitPreference),
    Back,
}

impl fmt::Display for ResultChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultChoice::City(row) => write!(f, "{} ({})", row.title, row.temperature),
            ResultChoice::ToggleUnit(unit) => {
                write!(f, "Switch to {}", unit.toggled().temperature_suffix())
            }
            ResultChoice::Back => f.write_str("Back"),
        }
    }
}

/// Interactive terminal session: one screen at a time, driven by prompts.
pub struct Session {
    ctx: ScreenContext,
    nav: Navigator,
}

impl Session {
    pub fn new(ctx: ScreenContext, root: Route) -> Self {
        Self {
            ctx,
            nav: Navigator::new(root),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            self.ctx.theme.on_system_change(detect_system_theme());

            let step = match self.nav.current().clone() {
                Route::Home => self.home().await?,
                Route::Search => self.search()?,
                Route::SearchResults { query } => self.search_results(&query).await?,
                Route::CityDetail { selection } => self.city(selection).await?,
            };

            match step {
                Step::Push(route) => self.nav.push(route),
                Step::Back => {
                    if self.nav.back().is_none() {
                        return Ok(());
                    }
                }
                Step::Home => self.nav.reset(Route::Home),
                Step::Quit => return Ok(()),
            }
        }
    }

    async fn home(&mut self) -> anyhow::Result<Step> {
        let mut screen = HomeScreen::new(self.ctx.clone());
        println!("Loading...");
        screen.mount().await;

        loop {
            render::print_panel(screen.panel(), NO_DATA_MESSAGE);

            let menu = screen.menu();
            let options = vec![
                HomeChoice::ToggleUnit(menu.toggle_unit),
                HomeChoice::ToggleTheme(menu.toggle_theme),
                HomeChoice::Search,
                HomeChoice::Quit,
            ];

            match render::choose("Options", options, self.ctx.theme.palette())? {
                Some(HomeChoice::ToggleUnit(_)) => {
                    println!("Loading...");
                    screen.toggle_unit().await;
                }
                Some(HomeChoice::ToggleTheme(_)) => {
                    screen.toggle_theme();
                }
                Some(HomeChoice::Search) => return Ok(Step::Push(screen.open_search())),
                Some(HomeChoice::Quit) | None => return Ok(Step::Quit),
            }
        }
    }

    fn search(&mut self) -> anyhow::Result<Step> {
        let mut screen = SearchScreen::new();

        loop {
            let Some(input) = render::ask("Enter city name", self.ctx.theme.palette())? else {
                return Ok(Step::Back);
            };
            screen.set_input(input);

            match screen.submit() {
                Some(route) => return Ok(Step::Push(route)),
                None => println!("Please type a city name."),
            }
        }
    }

    async fn search_results(&mut self, query: &str) -> anyhow::Result<Step> {
        let mut screen = SearchResultsScreen::new(self.ctx.clone());
        println!("Searching for \"{query}\"...");
        screen.load(query).await;

        loop {
            let rows = screen.rows();
            if rows.is_empty() {
                println!("{}", screen.empty_message());
            } else {
                render::print_rows(&rows);
            }

            let mut options: Vec<ResultChoice> = rows.into_iter().map(ResultChoice::City).collect();
            options.push(ResultChoice::ToggleUnit(self.ctx.units.get()));
            options.push(ResultChoice::Back);

            match render::choose("Pick a city", options, self.ctx.theme.palette())? {
                Some(ResultChoice::City(row)) => {
                    if let Some(route) = screen.select(row.id) {
                        return Ok(Step::Push(route));
                    }
                }
                Some(ResultChoice::ToggleUnit(_)) => {
                    self.ctx.units.toggle();
                    screen.refresh_on_unit_change().await;
                }
                Some(ResultChoice::Back) | None => return Ok(Step::Back),
            }
        }
    }

    async fn city(&mut self, selection: Option<SelectionId>) -> anyhow::Result<Step> {
        let mut screen = CityScreen::new(self.ctx.clone());
        screen.mount(selection).await;

        loop {
            render::print_panel(screen.panel(), screen.empty_message());

            let options = vec![
                CityChoice::ToggleUnit(self.ctx.units.get()),
                CityChoice::BackHome,
            ];

            match render::choose("Options", options, self.ctx.theme.palette())? {
                Some(CityChoice::ToggleUnit(_)) => {
                    println!("Loading...");
                    screen.toggle_unit().await;
                }
                Some(CityChoice::BackHome) => return Ok(Step::Home),
                None => return Ok(Step::Back),
            }
        }
    }
}
