use anyhow::{Context, bail};
use inquire::{InquireError, Text};
use skycast_core::{
    FormOutcome, LookupForm, Navigation, NavigationState, Route, Router, WeatherApiProvider,
    WeatherViewer, error::EMPTY_CITY_MESSAGE,
};
use tracing::debug;

/// Terminal front end: the form prompt, the router and the weather view.
pub struct App {
    provider: WeatherApiProvider,
    router: Router,
    form: LookupForm,
    viewer: WeatherViewer,
}

impl App {
    pub fn new(provider: WeatherApiProvider) -> Self {
        Self {
            provider,
            router: Router::new(),
            form: LookupForm::new(),
            viewer: WeatherViewer::new(),
        }
    }

    /// Alternate between the form and the weather view until the prompt is cancelled.
    pub async fn interactive(mut self) -> anyhow::Result<()> {
        println!("SkyCast");

        loop {
            match self.router.current() {
                Route::Home => {
                    let input = match Text::new("City:")
                        .with_placeholder("Enter city name")
                        .prompt()
                    {
                        Ok(input) => input,
                        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                            self.viewer.unmount();
                            return Ok(());
                        }
                        Err(err) => return Err(err).context("Failed to read city"),
                    };
                    self.submit(input);
                }
                Route::Weather => {
                    self.render_weather().await;
                    self.router.redirect(Route::Home);
                }
            }
        }
    }

    pub async fn show(&mut self, city: &str) -> anyhow::Result<()> {
        self.form.set_input(city);
        match self.form.submit() {
            FormOutcome::Navigate(nav) => self.router.navigate(nav),
            FormOutcome::Invalid => {
                bail!(self.form.error().unwrap_or(EMPTY_CITY_MESSAGE));
            }
        }

        self.render_weather().await;
        Ok(())
    }

    pub async fn open(&mut self, path: &str, city: Option<String>) -> anyhow::Result<()> {
        let route = self.router.open(path);
        if let (Route::Weather, Some(city)) = (route, city) {
            self.router.navigate(Navigation { route, state: NavigationState::with_city(city) });
        }

        if self.router.current() == Route::Weather {
            self.render_weather().await;
        }
        if self.router.current() == Route::Home {
            println!("SkyCast: run `skycast` or `skycast show <CITY>` to look up a city.");
        }
        Ok(())
    }

    fn submit(&mut self, input: String) {
        self.form.set_input(input);
        match self.form.submit() {
            FormOutcome::Navigate(nav) => self.router.navigate(nav),
            FormOutcome::Invalid => {
                if let Some(error) = self.form.error() {
                    eprintln!("{error}");
                }
            }
        }
    }

    async fn render_weather(&mut self) {
        let nav = self.router.take_state();
        match self.viewer.show(&self.provider, &nav).await {
            Ok(state) => println!("{}", state.render()),
            Err(redirect) => {
                debug!(to = %redirect.0, "weather view has no city");
                self.router.redirect(redirect.0);
            }
        }
    }
}
