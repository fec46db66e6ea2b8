//! Weather view: one lookup per entry, rendered as Loading, Error or Ready.
//!
//! Every entry hands out a [`LookupTicket`]. Only the ticket issued by the most
//! recent entry may change the view, and an unmounted view accepts nothing, so
//! a late answer for an old city never reaches the screen.

use std::fmt::Write as _;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    error::{FETCH_ERROR_MESSAGE, FetchError, LookupError},
    model::{Query, WeatherResult},
    provider::WeatherProvider,
    router::{NavigationState, Route},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready(WeatherResult),
}

impl ViewState {
    pub fn render(&self) -> String {
        match self {
            ViewState::Loading => "Loading...".to_string(),
            ViewState::Error(message) => message.clone(),
            ViewState::Ready(weather) => render_card(weather),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }
}

fn render_card(weather: &WeatherResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}, {}", weather.location_name, weather.country_code);
    let _ = writeln!(out, "{}°C", weather.temperature_celsius);
    let _ = writeln!(out, "{}", weather.condition_text);
    let _ = writeln!(out, "Icon: {}", weather.condition_icon_url);
    let _ = write!(out, "Last updated: {}", weather.last_updated);
    out
}

/// Returned instead of a ticket when the view has nothing to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect(pub Route);

/// Permission to complete one lookup.
#[derive(Debug, Clone)]
pub struct LookupTicket {
    generation: u64,
    query: Query,
    cancel: CancellationToken,
}

impl LookupTicket {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Issue the ticket's single request. `None` means the ticket was cancelled
/// before the provider answered.
pub async fn fetch(
    provider: &dyn WeatherProvider,
    ticket: &LookupTicket,
) -> Option<Result<WeatherResult, FetchError>> {
    tokio::select! {
        biased;
        _ = ticket.cancel.cancelled() => {
            debug!(city = ticket.query.city(), "lookup cancelled before completion");
            None
        }
        outcome = provider.current(&ticket.query) => Some(outcome),
    }
}

#[derive(Debug)]
pub struct WeatherViewer {
    state: ViewState,
    generation: u64,
    active: Option<CancellationToken>,
    query: Option<Query>,
}

impl Default for WeatherViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherViewer {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            generation: 0,
            active: None,
            query: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Start a lookup for the city carried in `nav`. Without a city the view
    /// asks to be sent back to the form.
    pub fn enter(&mut self, nav: &NavigationState) -> Result<LookupTicket, Redirect> {
        let query = match nav.city.as_deref().map(Query::parse) {
            Some(Ok(query)) => query,
            None | Some(Err(_)) => {
                debug!(error = %LookupError::MissingContext, "redirecting to form");
                self.cancel_active();
                self.generation += 1;
                self.query = None;
                self.state = ViewState::Loading;
                return Err(Redirect(Route::Home));
            }
        };

        self.cancel_active();
        self.generation += 1;

        let cancel = CancellationToken::new();
        self.active = Some(cancel.clone());
        self.query = Some(query.clone());
        self.state = ViewState::Loading;

        info!(city = query.city(), generation = self.generation, "looking up weather");

        Ok(LookupTicket { generation: self.generation, query, cancel })
    }

    /// Apply the outcome of `ticket`'s request. Returns false when the ticket
    /// has been superseded or cancelled and the outcome was dropped.
    pub fn complete(
        &mut self,
        ticket: &LookupTicket,
        outcome: Result<WeatherResult, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation || ticket.is_cancelled() {
            debug!(
                city = ticket.query.city(),
                generation = ticket.generation,
                current = self.generation,
                "discarding stale weather result"
            );
            return false;
        }

        self.state = match outcome {
            Ok(weather) => ViewState::Ready(weather),
            Err(err) => {
                warn!(city = ticket.query.city(), error = %err, "weather lookup failed");
                ViewState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };
        self.active = None;
        true
    }

    /// Enter, fetch and complete in one go.
    pub async fn show(
        &mut self,
        provider: &dyn WeatherProvider,
        nav: &NavigationState,
    ) -> Result<&ViewState, Redirect> {
        let ticket = self.enter(nav)?;
        if let Some(outcome) = fetch(provider, &ticket).await {
            self.complete(&ticket, outcome);
        }
        Ok(&self.state)
    }

    /// The view is going away; whatever is still in flight must not land.
    pub fn unmount(&mut self) {
        self.cancel_active();
    }

    fn cancel_active(&mut self) {
        if let Some(token) = self.active.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn paris() -> WeatherResult {
        WeatherResult {
            location_name: "Paris".into(),
            country_code: "FR".into(),
            temperature_celsius: 18.0,
            condition_text: "Clear".into(),
            condition_icon_url: "https://x/y.png".into(),
            last_updated: "2024-01-01 12:00".into(),
            last_updated_at: None,
        }
    }

    fn london() -> WeatherResult {
        WeatherResult {
            location_name: "London".into(),
            country_code: "United Kingdom".into(),
            temperature_celsius: 11.5,
            condition_text: "Light rain".into(),
            condition_icon_url: "https://x/rain.png".into(),
            last_updated: "2024-01-01 11:45".into(),
            last_updated_at: None,
        }
    }

    #[derive(Debug, Default)]
    struct StubProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, query: &Query) -> Result<WeatherResult, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Status {
                    status: StatusCode::BAD_REQUEST,
                    body: "No matching location found.".into(),
                });
            }
            let mut weather = paris();
            weather.location_name = query.city().to_string();
            Ok(weather)
        }
    }

    #[derive(Debug)]
    struct NeverProvider;

    #[async_trait]
    impl WeatherProvider for NeverProvider {
        async fn current(&self, _query: &Query) -> Result<WeatherResult, FetchError> {
            std::future::pending().await
        }
    }

    #[test]
    fn starts_loading() {
        let viewer = WeatherViewer::new();
        assert_eq!(viewer.state(), &ViewState::Loading);
        assert_eq!(viewer.state().render(), "Loading...");
        assert!(!viewer.state().is_terminal());
    }

    #[test]
    fn missing_city_redirects_home() {
        let mut viewer = WeatherViewer::new();
        for nav in [NavigationState::default(), NavigationState::with_city("   ")] {
            let ticket = viewer.enter(&NavigationState::with_city("Paris")).expect("ticket");
            assert!(viewer.complete(&ticket, Ok(paris())));
            assert!(matches!(viewer.state(), ViewState::Ready(_)));

            assert_eq!(viewer.enter(&nav).unwrap_err(), Redirect(Route::Home));
            assert_eq!(viewer.state(), &ViewState::Loading);
            assert!(viewer.query().is_none());
            assert!(!viewer.state().render().contains("Paris"));

            // The lookup that was current before the redirect can no longer land.
            assert!(!viewer.complete(&ticket, Ok(paris())));
            assert_eq!(viewer.state(), &ViewState::Loading);
        }
    }

    #[test]
    fn ready_card_matches_provider_values() {
        let rendered = ViewState::Ready(paris()).render();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(
            lines,
            [
                "Paris, FR",
                "18°C",
                "Clear",
                "Icon: https://x/y.png",
                "Last updated: 2024-01-01 12:00",
            ]
        );
    }

    #[test]
    fn fractional_temperature_is_kept() {
        assert!(ViewState::Ready(london()).render().contains("11.5°C"));
    }

    #[test]
    fn failure_shows_generic_message_only() {
        let mut viewer = WeatherViewer::new();
        let ticket = viewer.enter(&NavigationState::with_city("Atlantis")).expect("ticket");

        let applied = viewer.complete(
            &ticket,
            Err(FetchError::Status {
                status: StatusCode::BAD_REQUEST,
                body: "No matching location found.".into(),
            }),
        );

        assert!(applied);
        assert_eq!(viewer.state().render(), "Error fetching weather data.");
        assert!(viewer.state().is_terminal());
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut viewer = WeatherViewer::new();
        let first = viewer.enter(&NavigationState::with_city("Paris")).expect("ticket");
        let second = viewer.enter(&NavigationState::with_city("London")).expect("ticket");

        assert!(first.is_cancelled());
        assert!(!viewer.complete(&first, Ok(paris())));
        assert_eq!(viewer.state(), &ViewState::Loading);

        assert!(viewer.complete(&second, Ok(london())));
        assert_eq!(viewer.state(), &ViewState::Ready(london()));
        assert_eq!(viewer.query().map(Query::city), Some("London"));
    }

    #[test]
    fn unmounted_viewer_ignores_late_result() {
        let mut viewer = WeatherViewer::new();
        let ticket = viewer.enter(&NavigationState::with_city("Paris")).expect("ticket");
        viewer.unmount();

        assert!(!viewer.complete(&ticket, Ok(paris())));
        assert_eq!(viewer.state(), &ViewState::Loading);
    }

    #[test]
    fn reentry_resets_to_loading() {
        let mut viewer = WeatherViewer::new();
        let ticket = viewer.enter(&NavigationState::with_city("Paris")).expect("ticket");
        viewer.complete(&ticket, Ok(paris()));
        assert!(viewer.state().is_terminal());

        let _next = viewer.enter(&NavigationState::with_city("London")).expect("ticket");
        assert_eq!(viewer.state(), &ViewState::Loading);
    }

    #[tokio::test]
    async fn show_issues_exactly_one_request() {
        let provider = StubProvider::default();
        let mut viewer = WeatherViewer::new();

        let state = viewer
            .show(&provider, &NavigationState::with_city("Paris"))
            .await
            .expect("rendered");

        assert!(matches!(state, ViewState::Ready(w) if w.location_name == "Paris"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn show_without_city_makes_no_request() {
        let provider = StubProvider::default();
        let mut viewer = WeatherViewer::new();

        let redirect = viewer.show(&provider, &NavigationState::default()).await.unwrap_err();

        assert_eq!(redirect, Redirect(Route::Home));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn show_failure_renders_error() {
        let provider = StubProvider { fail: true, ..Default::default() };
        let mut viewer = WeatherViewer::new();

        let state = viewer
            .show(&provider, &NavigationState::with_city("Atlantis"))
            .await
            .expect("rendered");

        assert_eq!(state, &ViewState::Error(FETCH_ERROR_MESSAGE.into()));
    }

    #[tokio::test]
    async fn cancelled_fetch_returns_nothing() {
        let provider = Arc::new(NeverProvider);
        let mut viewer = WeatherViewer::new();
        let ticket = viewer.enter(&NavigationState::with_city("Paris")).expect("ticket");

        let pending = {
            let provider = Arc::clone(&provider);
            let ticket = ticket.clone();
            tokio::spawn(async move { fetch(provider.as_ref(), &ticket).await })
        };

        viewer.unmount();

        let outcome = pending.await.expect("task joined");
        assert!(outcome.is_none());
        assert_eq!(viewer.state(), &ViewState::Loading);
    }
}
