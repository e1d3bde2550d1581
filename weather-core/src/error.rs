//! Error types for preference validation and day recommendation.

use thiserror::Error;

/// A preference record that breaks one of its range rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreferenceError {
    #[error("{field} must be between -60 and 60, got {value}")]
    TemperatureOutOfRange { field: &'static str, value: i32 },

    #[error(
        "Max temperature ({max}) must be greater than or equal to minimal temperature ({min})"
    )]
    InvertedTemperatureRange { min: i32, max: i32 },

    #[error("latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Please set both latitude and longitude")]
    MissingLocation,

    #[error("Weather provider returned no forecast for this location")]
    EmptyForecast,

    #[error("No forecast candidates to choose from")]
    NoCandidates,

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl RecommendError {
    /// Short message suitable for end users.
    pub fn user_message(&self) -> String {
        match self {
            RecommendError::MissingLocation => {
                "Please set both latitude and longitude.\n\
                 Hint: run `weatherpick prefs set <profile> --lat <lat> --lon <lon>`."
                    .to_string()
            }
            RecommendError::EmptyForecast | RecommendError::NoCandidates => {
                "The weather provider couldn't provide future weather for this location."
                    .to_string()
            }
            RecommendError::Upstream(err) => format!("Weather provider error: {err:#}"),
        }
    }
}
