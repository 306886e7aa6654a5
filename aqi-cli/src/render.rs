//! Plain-text views of a report. Each view implements `Display`, so the
//! caller decides where it goes.

use std::fmt;

use aqi_core::{AirQualitySeries, AqiCategory, CityReport, CityTable};

const UNIT: &str = "μg/m³";

/// The whole `show` output for one city.
pub struct ReportView<'a> {
    pub report: &'a CityReport,
    pub with_series: bool,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "{}", report.city.name)?;
        match &report.temperature {
            Ok(temp) => writeln!(f, "Current Temperature: {temp:.1}°C")?,
            Err(err) => writeln!(f, "Error fetching temperature data: {err}")?,
        }
        writeln!(f)?;

        match &report.air_quality {
            Ok(series) => {
                write!(f, "{}", AirQualityView(series))?;
                if self.with_series && !series.is_empty() {
                    writeln!(f)?;
                    write!(f, "{}", SeriesTable(series))?;
                }
            }
            Err(err) => writeln!(f, "Error fetching data: {err}")?,
        }

        writeln!(f)?;
        writeln!(f, "Last updated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// AQI level, recommendation and particulate metrics for the current sample.
pub struct AirQualityView<'a>(pub &'a AirQualitySeries);

impl fmt::Display for AirQualityView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(current) = self.0.current() else {
            return writeln!(f, "No air quality samples were returned for this location.");
        };

        let reading = current.reading();
        let decoration = reading.category().map(|c| format!(" {}", c.emoji())).unwrap_or_default();

        writeln!(f, "Current AQI Level: {}{} [{}]", reading.label(), decoration, reading.color())?;
        writeln!(f)?;
        writeln!(f, "  {}", reading.message())?;
        writeln!(f, "  {}", reading.details())?;
        writeln!(f)?;

        writeln!(f, "Particulate Matter")?;
        writeln!(f, "  Current PM2.5: {:.1} {UNIT}", current.pollutants.pm2_5)?;
        writeln!(f, "  Current PM10:  {:.1} {UNIT}", current.pollutants.pm10)
    }
}

pub struct SeriesTable<'a>(pub &'a AirQualitySeries);

impl fmt::Display for SeriesTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16}  {:>3}  {:>8}  {:>7}  {:>7}  {:>7}  {:>7}  {:>7}  {:>6}  {:>6}",
            "date", "aqi", "co", "no", "no2", "o3", "so2", "nh3", "pm2_5", "pm10"
        )?;
        for sample in self.0.iter() {
            let p = &sample.pollutants;
            writeln!(
                f,
                "{:<16}  {:>3}  {:>8.2}  {:>7.2}  {:>7.2}  {:>7.2}  {:>7.2}  {:>7.2}  {:>6.1}  {:>6.1}",
                sample.date, sample.aqi, p.co, p.no, p.no2, p.o3, p.so2, p.nh3, p.pm2_5, p.pm10
            )?;
        }
        Ok(())
    }
}

pub struct CityList<'a>(pub &'a CityTable);

impl fmt::Display for CityList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cities = self.0.cities();
        let width = cities.iter().map(|c| c.name.len()).max().unwrap_or(0);

        for city in cities {
            writeln!(f, "{:<width$}  {}", city.name, city.coordinates)?;
        }
        Ok(())
    }
}

/// Dashboard notes and the AQI scale.
pub struct ScaleInfo;

impl fmt::Display for ScaleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard Information")?;
        writeln!(f, "- Shows air quality data for major cities in Pakistan")?;
        writeln!(f, "- Pollutant levels are in {UNIT}")?;
        writeln!(f, "- AQI Scale:")?;
        for category in AqiCategory::all() {
            writeln!(
                f,
                "  - {} = {} ({})",
                category.index(),
                category.label(),
                category.scale_hint()
            )?;
        }
        Ok(())
    }
}
