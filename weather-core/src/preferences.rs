use serde::{Deserialize, Serialize};

use crate::{error::PreferenceError, model::Location};

/// Lowest and highest temperature (°C) a user may prefer.
pub const TEMPERATURE_LIMIT: i32 = 60;

/// What a user wants from a day. Unset fields mean "no opinion".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceVector {
    pub temp_min: Option<i32>,
    pub temp_max: Option<i32>,
    pub likes_rain: Option<bool>,
    pub likes_sun: Option<bool>,
    pub likes_wind: Option<bool>,
    pub likes_fog: Option<bool>,
    pub likes_snow: Option<bool>,
}

/// Stored record for one profile: where they are and what they like.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_rain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_sun: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_wind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_fog: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_snow: Option<bool>,
}

/// Partial update: only fields that are `Some` overwrite the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesUpdate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub temp_min: Option<i32>,
    pub temp_max: Option<i32>,
    pub likes_rain: Option<bool>,
    pub likes_sun: Option<bool>,
    pub likes_wind: Option<bool>,
    pub likes_fog: Option<bool>,
    pub likes_snow: Option<bool>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl WeatherPreferences {
    /// Both coordinates, or `None` while either is missing.
    pub fn location(&self) -> Option<Location> {
        Some(Location {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }

    pub fn vector(&self) -> PreferenceVector {
        PreferenceVector {
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            likes_rain: self.likes_rain,
            likes_sun: self.likes_sun,
            likes_wind: self.likes_wind,
            likes_fog: self.likes_fog,
            likes_snow: self.likes_snow,
        }
    }

    /// Apply `update` on top of `self` and validate the result.
    /// `self` is left untouched on failure.
    pub fn merged(&self, update: &PreferencesUpdate) -> Result<Self, PreferenceError> {
        let mut next = self.clone();

        overwrite(&mut next.latitude, update.latitude);
        overwrite(&mut next.longitude, update.longitude);
        overwrite(&mut next.temp_min, update.temp_min);
        overwrite(&mut next.temp_max, update.temp_max);
        overwrite(&mut next.likes_rain, update.likes_rain);
        overwrite(&mut next.likes_sun, update.likes_sun);
        overwrite(&mut next.likes_wind, update.likes_wind);
        overwrite(&mut next.likes_fog, update.likes_fog);
        overwrite(&mut next.likes_snow, update.likes_snow);

        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> Result<(), PreferenceError> {
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(PreferenceError::LatitudeOutOfRange(lat));
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(PreferenceError::LongitudeOutOfRange(lon));
            }
        }

        check_temperature("temp_min", self.temp_min)?;
        check_temperature("temp_max", self.temp_max)?;

        if let (Some(min), Some(max)) = (self.temp_min, self.temp_max) {
            if max < min {
                return Err(PreferenceError::InvertedTemperatureRange { min, max });
            }
        }

        Ok(())
    }
}

fn overwrite<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if let Some(value) = incoming {
        *slot = Some(value);
    }
}

fn check_temperature(field: &'static str, value: Option<i32>) -> Result<(), PreferenceError> {
    match value {
        Some(value) if !(-TEMPERATURE_LIMIT..=TEMPERATURE_LIMIT).contains(&value) => {
            Err(PreferenceError::TemperatureOutOfRange { field, value })
        }
        _ => Ok(()),
    }
}
