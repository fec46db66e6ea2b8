use reqwest::StatusCode;
use thiserror::Error;

/// Message rendered for every failed lookup. Provider details stay in the logs.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching weather data.";

/// Message shown by the lookup form when the submitted city is blank.
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name.";

/// Failure of a single request to the weather provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode weather provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Everything that can go wrong between typing a city and seeing a card.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Blank input, reported next to the form.
    #[error("Please enter a city name.")]
    Validation,

    #[error("Error fetching weather data.")]
    Network(#[from] FetchError),

    /// The viewer was entered without a city; handled by redirecting home.
    #[error("weather view entered without a city")]
    MissingContext,
}

impl LookupError {
    /// Text safe to put in front of the user. A missing city is handled by
    /// redirecting, so it has nothing to show.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            LookupError::Validation => Some(EMPTY_CITY_MESSAGE),
            LookupError::Network(_) => Some(FETCH_ERROR_MESSAGE),
            LookupError::MissingContext => None,
        }
    }
}
