use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::aqi::AqiReading;

/// Display format for sample timestamps, in local time.
pub const SAMPLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub nh3: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

impl Pollutants {
    /// Gases keep two decimals, particulates one.
    pub fn rounded(self) -> Self {
        Self {
            co: round_to(self.co, 2),
            no: round_to(self.no, 2),
            no2: round_to(self.no2, 2),
            o3: round_to(self.o3, 2),
            so2: round_to(self.so2, 2),
            nh3: round_to(self.nh3, 2),
            pm2_5: round_to(self.pm2_5, 1),
            pm10: round_to(self.pm10, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    pub unix_time: i64,
    /// Local date-time, formatted with [`SAMPLE_TIME_FORMAT`].
    pub date: String,
    /// Category as sent by the API; see [`AirQualitySample::reading`].
    pub aqi: i64,
    pub pollutants: Pollutants,
}

impl AirQualitySample {
    pub fn reading(&self) -> AqiReading {
        AqiReading::from_raw(self.aqi)
    }
}

/// Samples in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySeries {
    pub samples: Vec<AirQualitySample>,
}

impl AirQualitySeries {
    pub fn new(samples: Vec<AirQualitySample>) -> Self {
        Self { samples }
    }

    /// The latest reading, which the API puts first.
    pub fn current(&self) -> Option<&AirQualitySample> {
        self.samples.first()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AirQualitySample> {
        self.samples.iter()
    }
}

/// Rounds to `decimals` places from the exact binary value of `value`,
/// breaking exact ties to even. Float formatting does the decimal rounding.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Converts a unix timestamp to local time; `None` if chrono can't represent it.
pub fn unix_to_local(ts: i64) -> Option<DateTime<Local>> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|utc| utc.with_timezone(&Local))
}

pub fn format_unix_local(ts: i64) -> Option<String> {
    unix_to_local(ts).map(|dt| dt.format(SAMPLE_TIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pollutants(value: f64) -> Pollutants {
        Pollutants {
            co: value,
            no: value,
            no2: value,
            o3: value,
            so2: value,
            nh3: value,
            pm2_5: value,
            pm10: value,
        }
    }

    #[test]
    fn round_co_to_two_decimals() {
        assert_eq!(round_to(12.345, 2), 12.35);
    }

    #[test]
    fn round_pm25_to_one_decimal() {
        assert_eq!(round_to(45.67, 1), 45.7);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_to(12.25, 1), 12.2);
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn near_ties_follow_the_stored_value() {
        // 1.45 and 2.675 are stored slightly below the halfway point.
        assert_eq!(round_to(1.45, 1), 1.4);
        assert_eq!(round_to(0.35, 1), 0.3);
        assert_eq!(round_to(2.675, 2), 2.67);
        // 12.345 is stored slightly above it.
        assert_eq!(round_to(12.345, 2), 12.35);
    }

    #[test]
    fn negative_and_non_finite_values() {
        assert_eq!(round_to(-12.25, 1), -12.2);
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 1), f64::INFINITY);
    }

    #[test]
    fn rounded_uses_per_field_precision() {
        let p = pollutants(3.456).rounded();

        assert_eq!(p.co, 3.46);
        assert_eq!(p.nh3, 3.46);
        assert_eq!(p.pm2_5, 3.5);
        assert_eq!(p.pm10, 3.5);
    }

    #[test]
    fn formats_known_timestamp() {
        let s = format_unix_local(1_700_000_000).expect("timestamp is in range");

        // 2023-11-14 22:13 UTC, which is the 14th or 15th in any timezone.
        assert_eq!(s.len(), 16);
        assert!(s.starts_with("2023-11-1"), "got {s}");
    }

    #[test]
    fn out_of_range_timestamp_is_none() {
        assert!(format_unix_local(i64::MAX).is_none());
    }

    #[test]
    fn current_is_first_sample() {
        let sample = |aqi, unix_time| AirQualitySample {
            unix_time,
            date: String::new(),
            aqi,
            pollutants: pollutants(1.0),
        };
        let series = AirQualitySeries::new(vec![sample(2, 10), sample(4, 20)]);

        assert_eq!(series.current().map(|s| s.aqi), Some(2));
        assert!(AirQualitySeries::default().current().is_none());
    }
}
