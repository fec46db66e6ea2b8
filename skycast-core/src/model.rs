use chrono::{DateTime, Utc};

use crate::error::LookupError;

/// A validated city name driving one weather lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    city: String,
}

impl Query {
    /// Trim the raw input and reject it if nothing is left.
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(LookupError::Validation);
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn into_city(self) -> String {
        self.city
    }
}

/// Current conditions for one location, as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    pub location_name: String,
    pub country_code: String,
    pub temperature_celsius: f64,
    pub condition_text: String,
    pub condition_icon_url: String,
    /// Provider-local timestamp, kept exactly as received (e.g. `2024-01-01 12:00`).
    pub last_updated: String,
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// Turn the provider's protocol-relative icon path into a full URL.
pub fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    }
}
