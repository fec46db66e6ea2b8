//! In-memory routing between the lookup form and the weather view.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Weather,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Weather => "/weather",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/weather" => Some(Route::Weather),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// State carried along with a navigation. Not part of the path, so a
/// `/weather` entry without it cannot be reproduced from the path alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub city: Option<String>,
}

impl NavigationState {
    pub fn with_city(city: impl Into<String>) -> Self {
        Self { city: Some(city.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub state: NavigationState,
}

#[derive(Debug)]
pub struct Router {
    current: Route,
    state: Option<NavigationState>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self { current: Route::Home, state: None }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, nav: Navigation) {
        tracing::debug!(route = %nav.route, "navigate");
        self.current = nav.route;
        self.state = Some(nav.state);
    }

    /// Enter a route by path with no navigation state, as a direct visit would.
    /// Unknown paths land on the home route.
    pub fn open(&mut self, path: &str) -> Route {
        let route = Route::from_path(path).unwrap_or_else(|| {
            tracing::debug!(path, "unknown path, falling back to home");
            Route::Home
        });
        self.current = route;
        self.state = None;
        route
    }

    pub fn redirect(&mut self, route: Route) {
        tracing::debug!(from = %self.current, to = %route, "redirect");
        self.current = route;
        self.state = None;
    }

    /// Hand the pending navigation state to the view. Subsequent calls get an
    /// empty state.
    pub fn take_state(&mut self) -> NavigationState {
        self.state.take().unwrap_or_default()
    }
}
