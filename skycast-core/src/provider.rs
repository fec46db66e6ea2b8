use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, FetchError, Query, WeatherResult};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<WeatherResult, FetchError>;
}

/// Construct the weatherapi.com provider from config, resolving the API key at runtime.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.api_key()?;
    WeatherApiProvider::new(api_key, config)
}
