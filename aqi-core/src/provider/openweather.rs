use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    city::Coordinates,
    error::FetchError,
    model::{AirQualitySample, AirQualitySeries, Pollutants, format_unix_local, round_to},
};

use super::AirQualityProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        debug!(%status, "received response from OpenWeather");
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::status(status, &body));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwPollutionResponse {
    list: Option<Vec<OwPollutionItem>>,
}

#[derive(Debug, Deserialize)]
struct OwPollutionItem {
    dt: i64,
    main: OwAqi,
    components: Pollutants,
}

#[derive(Debug, Deserialize)]
struct OwAqi {
    aqi: serde_json::Number,
}

/// Any JSON number is accepted so a bad category never drops the series.
/// Fractional values map to 0, which is outside the scale.
fn raw_aqi(n: &serde_json::Number) -> i64 {
    if let Some(v) = n.as_i64() {
        return v;
    }
    if n.as_u64().is_some() {
        return i64::MAX;
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 => f as i64,
        _ => {
            warn!(aqi = %n, "non-integral AQI value");
            0
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwWeatherResponse {
    main: OwWeatherMain,
}

#[derive(Debug, Deserialize)]
struct OwWeatherMain {
    temp: f64,
}

fn parse_pollution(body: &str) -> Result<AirQualitySeries, FetchError> {
    let parsed: OwPollutionResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::schema(format!("air pollution JSON: {e}")))?;

    let list = parsed.list.ok_or_else(|| {
        FetchError::schema(format!(
            "air pollution response has no `list` field: {}",
            crate::error::truncate_body(body)
        ))
    })?;

    let samples = list
        .into_iter()
        .map(|item| {
            let date = format_unix_local(item.dt).ok_or_else(|| {
                FetchError::schema(format!("timestamp {} is out of range", item.dt))
            })?;

            Ok(AirQualitySample {
                unix_time: item.dt,
                date,
                aqi: raw_aqi(&item.main.aqi),
                pollutants: item.components.rounded(),
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    Ok(AirQualitySeries::new(samples))
}

fn parse_temperature(body: &str) -> Result<f64, FetchError> {
    let parsed: OwWeatherResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::schema(format!("current weather JSON: {e}")))?;

    Ok(round_to(parsed.main.temp, 1))
}

fn coord_query(coords: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}

#[async_trait]
impl AirQualityProvider for OpenWeatherClient {
    #[instrument(skip(self), fields(lat = coords.lat, lon = coords.lon))]
    async fn air_pollution(&self, coords: Coordinates) -> Result<AirQualitySeries, FetchError> {
        let body = self.get_body("air_pollution", &coord_query(coords)).await?;
        let series = parse_pollution(&body)?;

        debug!(samples = series.len(), "parsed air pollution series");
        Ok(series)
    }

    #[instrument(skip(self), fields(lat = coords.lat, lon = coords.lon))]
    async fn current_temperature(&self, coords: Coordinates) -> Result<f64, FetchError> {
        let mut query = coord_query(coords);
        query.push(("units", "metric".to_string()));

        let body = self.get_body("weather", &query).await?;
        parse_temperature(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "coord": {"lon": 74.3587, "lat": 31.5204},
        "list": [{
            "main": {"aqi": 5},
            "components": {
                "co": 1228.17, "no": 12.345, "no2": 48.67, "o3": 0.02,
                "so2": 23.61, "pm2_5": 45.67, "pm10": 210.04, "nh3": 17.99
            },
            "dt": 1700000000
        }]
    }"#;

    #[test]
    fn parses_and_rounds_pollution_sample() {
        let series = parse_pollution(SAMPLE).expect("well-formed body");
        let sample = series.current().expect("one sample");

        assert_eq!(series.len(), 1);
        assert_eq!(sample.unix_time, 1_700_000_000);
        assert_eq!(sample.aqi, 5);
        assert_eq!(sample.pollutants.no, 12.35);
        assert_eq!(sample.pollutants.pm2_5, 45.7);
        assert_eq!(sample.pollutants.pm10, 210.0);
        assert_eq!(sample.date.len(), 16);
    }

    fn body_with_aqi(aqi: &str) -> String {
        format!(
            r#"{{"list": [{{"dt": 1700000000, "main": {{"aqi": {aqi}}}, "components": {{
                "co": 1.0, "no": 1.0, "no2": 1.0, "o3": 1.0,
                "so2": 1.0, "pm2_5": 1.0, "pm10": 1.0, "nh3": 1.0}}}}]}}"#
        )
    }

    #[test]
    fn odd_aqi_values_keep_the_series() {
        let cases = [
            ("256", 256),
            ("-1", -1),
            ("3.0", 3),
            ("3.5", 0),
            ("18446744073709551615", i64::MAX),
        ];

        for (json, expected) in cases {
            let series = parse_pollution(&body_with_aqi(json))
                .unwrap_or_else(|e| panic!("aqi {json} should parse: {e}"));
            assert_eq!(series.current().map(|s| s.aqi), Some(expected), "aqi {json}");
        }
    }

    #[test]
    fn missing_list_is_schema_error() {
        let err = parse_pollution(r#"{"cod": "400", "message": "wrong latitude"}"#).unwrap_err();

        assert!(err.is_schema_error());
        assert!(err.to_string().contains("`list`"));
    }

    #[test]
    fn missing_component_is_schema_error() {
        let body = r#"{"list": [{"dt": 1, "main": {"aqi": 1}, "components": {"co": 1.0}}]}"#;
        assert!(parse_pollution(body).unwrap_err().is_schema_error());
    }

    #[test]
    fn empty_list_is_an_empty_series() {
        let series = parse_pollution(r#"{"list": []}"#).expect("empty list is valid");
        assert!(series.is_empty());
    }

    #[test]
    fn non_json_body_is_schema_error() {
        assert!(parse_pollution("<html>oops</html>").unwrap_err().is_schema_error());
        assert!(parse_temperature("<html>oops</html>").unwrap_err().is_schema_error());
    }

    #[test]
    fn temperature_rounds_to_one_decimal() {
        let temp = parse_temperature(r#"{"main": {"temp": 18.46, "humidity": 40}}"#)
            .expect("well-formed body");
        assert_eq!(temp, 18.5);
    }

    #[test]
    fn temperature_without_main_is_schema_error() {
        assert!(parse_temperature(r#"{"cod": 401}"#).unwrap_err().is_schema_error());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenWeatherClient::new(
            "KEY".into(),
            "http://localhost/data/2.5/".into(),
            Duration::from_secs(1),
        )
        .expect("client builds");
        assert_eq!(client.base_url, "http://localhost/data/2.5");
    }
}
