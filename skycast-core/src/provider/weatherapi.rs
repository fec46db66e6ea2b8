use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    Config, FetchError, Query,
    model::{WeatherResult, icon_url},
};

use super::WeatherProvider;

/// Client for the weatherapi.com `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
    last_updated: String,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherResult {
    fn from(parsed: WaResponse) -> Self {
        WeatherResult {
            location_name: parsed.location.name,
            country_code: parsed.location.country,
            temperature_celsius: parsed.current.temp_c,
            condition_icon_url: icon_url(&parsed.current.condition.icon),
            condition_text: parsed.current.condition.text,
            last_updated: parsed.current.last_updated,
            last_updated_at: parsed
                .current
                .last_updated_epoch
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self, query), fields(city = query.city()))]
    async fn current(&self, query: &Query) -> Result<WeatherResult, FetchError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[("key", self.api_key.as_str()), ("q", query.city())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "weather request rejected");
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaResponse = serde_json::from_str(&body)?;
        debug!(location = %parsed.location.name, "weather received");

        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
