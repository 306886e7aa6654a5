//! Core library for the `aqi` CLI.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The city table and AQI classification
//! - An OpenWeather client behind the [`AirQualityProvider`] trait
//! - Report assembly for a single city
//!
//! It is used by `aqi-cli`, but can also be reused by other binaries or services.

pub mod aqi;
pub mod city;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use aqi::{AqiCategory, AqiReading};
pub use city::{City, CityTable, Coordinates};
pub use config::Config;
pub use error::{ClassificationError, FetchError};
pub use model::{AirQualitySample, AirQualitySeries, Pollutants};
pub use provider::{AirQualityProvider, openweather::OpenWeatherClient, provider_from_config};
pub use report::{CityReport, fetch_report};
