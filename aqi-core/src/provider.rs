use crate::{
    AirQualitySeries, Config, Coordinates, error::FetchError,
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of pollution and temperature readings for a location.
#[async_trait]
pub trait AirQualityProvider: Send + Sync + Debug {
    async fn air_pollution(&self, coords: Coordinates) -> Result<AirQualitySeries, FetchError>;

    /// Current temperature in °C, rounded to one decimal.
    async fn current_temperature(&self, coords: Coordinates) -> Result<f64, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn AirQualityProvider>> {
    let api_key = config.api_key()?;
    let client = OpenWeatherClient::new(api_key, config.base_url.clone(), config.timeout())?;

    Ok(Box::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
