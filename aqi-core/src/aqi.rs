//! AQI categories as reported by OpenWeather (1 = best, 5 = worst) and the
//! advice shown for each of them.

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};
use tracing::warn;

use crate::error::ClassificationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiCategory {
    pub const fn all() -> &'static [AqiCategory] {
        &[
            AqiCategory::Good,
            AqiCategory::Fair,
            AqiCategory::Moderate,
            AqiCategory::Poor,
            AqiCategory::VeryPoor,
        ]
    }

    /// The API's numeric value for this category.
    pub const fn index(self) -> i64 {
        match self {
            AqiCategory::Good => 1,
            AqiCategory::Fair => 2,
            AqiCategory::Moderate => 3,
            AqiCategory::Poor => 4,
            AqiCategory::VeryPoor => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Fair => "Fair",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            AqiCategory::Good => "😊",
            AqiCategory::Fair => "🙂",
            AqiCategory::Moderate => "😐",
            AqiCategory::Poor => "😷",
            AqiCategory::VeryPoor => "🤢",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            AqiCategory::Good => "green",
            AqiCategory::Fair => "yellow",
            AqiCategory::Moderate => "orange",
            AqiCategory::Poor => "red",
            AqiCategory::VeryPoor => "purple",
        }
    }

    /// Headline recommendation.
    pub const fn message(self) -> &'static str {
        match self {
            AqiCategory::Good => "It's safe to go outside!",
            AqiCategory::Fair => "Generally safe for outdoor activities",
            AqiCategory::Moderate => "Take Precautions",
            AqiCategory::Poor => "Stay Indoors Recommended",
            AqiCategory::VeryPoor => "Avoid Outdoor Activities",
        }
    }

    pub const fn details(self) -> &'static str {
        match self {
            AqiCategory::Good => "Air quality is good. Perfect for outdoor activities.",
            AqiCategory::Fair => {
                "Sensitive individuals should consider reducing prolonged outdoor exertion."
            }
            AqiCategory::Moderate => {
                "Wear a mask if going outside. Consider limiting outdoor activities."
            }
            AqiCategory::Poor => "Avoid outdoor activities. If you must go out, wear a proper mask.",
            AqiCategory::VeryPoor => {
                "Hazardous air quality. Stay indoors and keep windows closed. Use air purifiers if available."
            }
        }
    }

    /// One-line summary used in the scale listing.
    pub const fn scale_hint(self) -> &'static str {
        match self {
            AqiCategory::Good => "Safe for outdoor activities",
            AqiCategory::Fair => "Generally safe",
            AqiCategory::Moderate => "Take precautions",
            AqiCategory::Poor => "Stay indoors recommended",
            AqiCategory::VeryPoor => "Avoid outdoor activities",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i64> for AqiCategory {
    type Error = ClassificationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AqiCategory::Good),
            2 => Ok(AqiCategory::Fair),
            3 => Ok(AqiCategory::Moderate),
            4 => Ok(AqiCategory::Poor),
            5 => Ok(AqiCategory::VeryPoor),
            other => Err(ClassificationError(other)),
        }
    }
}

/// A classified AQI value. Values the API should never send end up as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiReading {
    Known(AqiCategory),
    Unknown(i64),
}

impl AqiReading {
    pub fn from_raw(raw: i64) -> Self {
        match AqiCategory::try_from(raw) {
            Ok(category) => AqiReading::Known(category),
            Err(err) => {
                warn!(%err, "falling back to unknown AQI category");
                AqiReading::Unknown(raw)
            }
        }
    }

    pub fn category(self) -> Option<AqiCategory> {
        match self {
            AqiReading::Known(category) => Some(category),
            AqiReading::Unknown(_) => None,
        }
    }

    pub fn label(self) -> &'static str {
        self.category().map_or("Unknown", AqiCategory::label)
    }

    pub fn color(self) -> &'static str {
        self.category().map_or("gray", AqiCategory::color)
    }

    pub fn message(self) -> &'static str {
        self.category().map_or("Air quality category unavailable", AqiCategory::message)
    }

    pub fn details(self) -> &'static str {
        self.category().map_or(
            "The service reported an AQI value outside the 1-5 scale.",
            AqiCategory::details,
        )
    }
}
