use crate::{config::Config, model::ParsedRequest, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Turns a parsed request into a human-readable report.
///
/// Implementations never fail outward: upstream problems come back as
/// descriptive text.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn report(&self, request: &ParsedRequest) -> String;
}

/// Construct the OpenWeather provider from runtime config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::from_settings(
        config.secrets.openweather_api_key.clone(),
        &config.settings.weather,
    )?;

    Ok(Arc::new(provider))
}
