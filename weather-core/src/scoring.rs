//! Rank daily samples against a user's preference vector.
//!
//! Every sample is scored on its own from three terms: temperature, the
//! condition family and wind. The highest score wins and ties go to the
//! sample that came first.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{
    error::RecommendError,
    model::{ConditionCode, ConditionFamily, WeatherSample},
    preferences::PreferenceVector,
};

// Weights are kept in half-points so the 7.5 temperature step stays integral.
const TEMPERATURE_WEIGHT: i32 = 15;
const CONDITION_WEIGHT: i32 = 20;
const WIND_WEIGHT: i32 = 6;

/// Wind speed (m/s) above which a sample counts as windy.
pub const WINDY_THRESHOLD_MPS: f64 = 6.0;

/// Desirability of a sample, counted in half-points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(i32);

impl Score {
    pub const ZERO: Score = Score(0);

    pub fn from_half_points(half_points: i32) -> Self {
        Self(half_points)
    }

    pub fn half_points(self) -> i32 {
        self.0
    }

    /// Score in points, e.g. `7.5` or `25.0`.
    pub fn points(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.points())
    }
}

/// A sample together with its score and its position in the candidate list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub index: usize,
    pub sample: WeatherSample,
    pub score: Score,
}

pub fn score(sample: &WeatherSample, prefs: &PreferenceVector) -> Score {
    let mut half_points = temperature_half_points(sample.temperature_c, prefs);
    half_points += condition_half_points(sample.condition, prefs);
    half_points += wind_half_points(sample.wind_speed_mps, prefs.likes_wind);
    Score(half_points)
}

/// Score every candidate, keeping input order.
pub fn rank(candidates: &[WeatherSample], prefs: &PreferenceVector) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let score = score(sample, prefs);
            tracing::debug!(
                index,
                observed_at = %sample.observed_at,
                condition = %sample.condition,
                temperature_c = sample.temperature_c,
                wind_speed_mps = sample.wind_speed_mps,
                %score,
                "scored forecast candidate"
            );
            ScoredCandidate {
                index,
                sample: sample.clone(),
                score,
            }
        })
        .collect()
}

/// Outcome of [`select_best`]: the winner and every candidate it beat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub best: ScoredCandidate,
    pub ranking: Vec<ScoredCandidate>,
}

/// Score `candidates` and pick the highest; on a tie the earliest one wins.
pub fn select_best(
    candidates: &[WeatherSample],
    prefs: &PreferenceVector,
) -> Result<Selection, RecommendError> {
    let ranking = rank(candidates, prefs);

    let best = ranking
        .iter()
        .reduce(|best, candidate| {
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        })
        .cloned()
        .ok_or(RecommendError::NoCandidates)?;

    Ok(Selection { best, ranking })
}

fn temperature_half_points(temperature_c: f64, prefs: &PreferenceVector) -> i32 {
    let mut half_points = 0;

    if let Some(min) = prefs.temp_min {
        if temperature_c < f64::from(min) {
            half_points -= TEMPERATURE_WEIGHT;
        } else {
            half_points += TEMPERATURE_WEIGHT;
        }
    }

    // A day already below the minimum gets no credit or penalty for the maximum.
    if half_points >= 0 {
        if let Some(max) = prefs.temp_max {
            if temperature_c > f64::from(max) {
                half_points -= TEMPERATURE_WEIGHT;
            } else {
                half_points += TEMPERATURE_WEIGHT;
            }
        }
    }

    half_points
}

fn condition_half_points(code: ConditionCode, prefs: &PreferenceVector) -> i32 {
    match code.family() {
        ConditionFamily::Precipitation => liking(prefs.likes_rain, CONDITION_WEIGHT),
        ConditionFamily::Sky => {
            let mut half_points = 0;
            // Two independent checks: a code added to neither set must score nothing.
            if prefs.likes_sun == Some(true) {
                if code.is_clear() {
                    half_points += CONDITION_WEIGHT;
                } else if code.is_cloudy() {
                    half_points -= CONDITION_WEIGHT;
                }
            }
            if prefs.likes_sun == Some(false) {
                if code.is_clear() {
                    half_points -= CONDITION_WEIGHT;
                } else if code.is_cloudy() {
                    half_points += CONDITION_WEIGHT;
                }
            }
            half_points
        }
        ConditionFamily::Snow => liking(prefs.likes_snow, CONDITION_WEIGHT),
        ConditionFamily::Fog => liking(prefs.likes_fog, CONDITION_WEIGHT),
        ConditionFamily::Other => 0,
    }
}

fn wind_half_points(wind_speed_mps: f64, likes_wind: Option<bool>) -> i32 {
    let windy = wind_speed_mps > WINDY_THRESHOLD_MPS;
    if windy {
        liking(likes_wind, WIND_WEIGHT)
    } else {
        -liking(likes_wind, WIND_WEIGHT)
    }
}

fn liking(preference: Option<bool>, weight: i32) -> i32 {
    match preference {
        Some(true) => weight,
        Some(false) => -weight,
        None => 0,
    }
}
