use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub coordinates: Coordinates,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: name.into(), coordinates: Coordinates::new(lat, lon) }
    }
}

/// The set of cities a user can pick from. Names are unique, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct CityTable {
    cities: Vec<City>,
}

impl CityTable {
    pub fn new(cities: Vec<City>) -> Result<Self> {
        for (i, city) in cities.iter().enumerate() {
            if cities[..i].iter().any(|c| c.name.eq_ignore_ascii_case(&city.name)) {
                return Err(anyhow!("Duplicate city name '{}' in city table", city.name));
            }
        }

        Ok(Self { cities })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn names(&self) -> Vec<&str> {
        self.cities.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&City> {
        let name = name.trim();
        self.cities.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Like [`find`](Self::find), but with an error listing the known names.
    pub fn lookup(&self, name: &str) -> Result<&City> {
        self.find(name).ok_or_else(|| {
            anyhow!("Unknown city '{}'. Known cities: {}.", name.trim(), self.names().join(", "))
        })
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityTable {
    /// Major cities of Pakistan.
    fn default() -> Self {
        Self {
            cities: vec![
                City::new("Lahore", 31.5204, 74.3587),
                City::new("Karachi", 24.8607, 67.0011),
                City::new("Islamabad", 33.6844, 73.0479),
                City::new("Peshawar", 34.0151, 71.5249),
                City::new("Quetta", 30.1798, 66.9750),
                City::new("Multan", 30.1575, 71.5249),
                City::new("Faisalabad", 31.4504, 73.1350),
                City::new("Murree", 33.9070, 73.3943),
                City::new("Toba Tek Singh", 30.9667, 72.4833),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_nine_cities() {
        let table = CityTable::default();
        assert_eq!(table.len(), 9);
        assert_eq!(table.names()[0], "Lahore");
        assert_eq!(table.names()[8], "Toba Tek Singh");
    }

    #[test]
    fn find_ignores_case_and_whitespace() {
        let table = CityTable::default();
        let city = table.find("  toba tek SINGH ").expect("city must exist");

        assert_eq!(city.name, "Toba Tek Singh");
        assert_eq!(city.coordinates, Coordinates::new(30.9667, 72.4833));
    }

    #[test]
    fn lookup_unknown_city_lists_known_names() {
        let table = CityTable::default();
        let err = table.lookup("Gotham").unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Unknown city 'Gotham'"));
        assert!(msg.contains("Karachi"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = CityTable::new(vec![City::new("Lahore", 1.0, 2.0), City::new("LAHORE", 3.0, 4.0)])
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate city name"));
    }

    #[test]
    fn coordinates_display_shortest_decimal() {
        assert_eq!(Coordinates::new(30.1798, 66.975).to_string(), "30.1798, 66.975");
    }
}
