use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Provider condition id, e.g. 500 for light rain or 800 for a clear sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCode(pub u16);

/// Broad weather category a condition code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionFamily {
    /// Thunderstorm (2xx), drizzle (3xx) and rain (5xx).
    Precipitation,
    /// Clear sky and clouds (8xx).
    Sky,
    /// Snow (6xx).
    Snow,
    /// Mist, smoke, haze and fog.
    Fog,
    Other,
}

impl ConditionCode {
    pub const FOG_CODES: [u16; 4] = [701, 711, 721, 741];

    pub fn leading_digit(self) -> u16 {
        let mut lead = self.0;
        while lead >= 10 {
            lead /= 10;
        }
        lead
    }

    /// Classify the code. Families are tested in a fixed order and the first
    /// match wins.
    pub fn family(self) -> ConditionFamily {
        match self.leading_digit() {
            2 | 3 | 5 => ConditionFamily::Precipitation,
            8 => ConditionFamily::Sky,
            6 => ConditionFamily::Snow,
            _ if Self::FOG_CODES.contains(&self.0) => ConditionFamily::Fog,
            _ => ConditionFamily::Other,
        }
    }

    /// Clear sky or few clouds.
    pub fn is_clear(self) -> bool {
        matches!(self.0, 800 | 801)
    }

    pub fn is_cloudy(self) -> bool {
        matches!(self.0, 802..=804)
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// One forecast or observation for a single instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub condition: ConditionCode,
    pub description: String,
    pub icon_url: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub wind_speed_mps: f64,
    pub humidity_pct: f64,
    pub visibility_m: Option<f64>,
    pub pressure_hpa: f64,
    pub observed_at: DateTime<Utc>,
}

/// Raw 3-hourly forecast as returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastFeed {
    /// Offset of the forecast location from UTC; used to find local dates.
    pub utc_offset: FixedOffset,
    /// Chronological samples, nearest-to-now first.
    pub samples: Vec<WeatherSample>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precipitation_family_covers_storm_drizzle_and_rain() {
        for code in [200, 232, 300, 321, 500, 531] {
            assert_eq!(ConditionCode(code).family(), ConditionFamily::Precipitation);
        }
    }

    #[test]
    fn only_listed_atmosphere_codes_are_fog() {
        for code in ConditionCode::FOG_CODES {
            assert_eq!(ConditionCode(code).family(), ConditionFamily::Fog);
        }
        assert_eq!(ConditionCode(731).family(), ConditionFamily::Other);
        assert_eq!(ConditionCode(781).family(), ConditionFamily::Other);
    }

    #[test]
    fn sky_codes_split_into_clear_and_cloudy() {
        assert!(ConditionCode(800).is_clear());
        assert!(ConditionCode(801).is_clear());
        for code in [802, 803, 804] {
            assert!(ConditionCode(code).is_cloudy());
            assert!(!ConditionCode(code).is_clear());
        }
        assert_eq!(ConditionCode(600).family(), ConditionFamily::Snow);
        assert_eq!(ConditionCode(804).family(), ConditionFamily::Sky);
    }
}
