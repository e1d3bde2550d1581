use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    Config,
    config::API_KEY_ENV,
    model::{ForecastFeed, Location, WeatherSample},
    provider::openweather::OpenWeatherClient,
};

pub mod openweather;

/// Source of current weather and 3-hourly forecasts for a location.
///
/// Implementations own all network I/O and reject payloads they cannot map
/// to [`WeatherSample`]s; callers never repair provider data.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> anyhow::Result<WeatherSample>;

    /// Up to five days of forecasts, nearest-to-now first.
    async fn forecast(&self, location: &Location) -> anyhow::Result<ForecastFeed>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weatherpick configure` or set {}.",
            API_KEY_ENV
        )
    })?;

    let client = OpenWeatherClient::new(
        api_key,
        &config.openweather.base_url,
        config.request_timeout(),
    )?;

    Ok(Box::new(client))
}
