use chrono::{DateTime, Local};
use tracing::{info, instrument, warn};

use crate::{AirQualitySeries, City, error::FetchError, provider::AirQualityProvider};

/// Everything shown for one city selection. Each section fails independently.
#[derive(Debug)]
pub struct CityReport {
    pub city: City,
    pub air_quality: Result<AirQualitySeries, FetchError>,
    pub temperature: Result<f64, FetchError>,
    pub generated_at: DateTime<Local>,
}

/// Fetches air quality, then temperature, for `city`.
#[instrument(skip(provider, city), fields(city = %city.name))]
pub async fn fetch_report(provider: &dyn AirQualityProvider, city: &City) -> CityReport {
    info!("fetching report");

    let air_quality = provider.air_pollution(city.coordinates).await;
    if let Err(err) = &air_quality {
        warn!(%err, "air quality fetch failed");
    }

    let temperature = provider.current_temperature(city.coordinates).await;
    if let Err(err) = &temperature {
        warn!(%err, "temperature fetch failed");
    }

    CityReport { city: city.clone(), air_quality, temperature, generated_at: Local::now() }
}
