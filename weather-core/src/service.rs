use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    error::RecommendError,
    forecast::{local_date, reduce_to_daily},
    model::{Location, WeatherSample},
    preferences::WeatherPreferences,
    provider::WeatherProvider,
    scoring::{ScoredCandidate, Selection, select_best},
};

/// Best day of the forecast plus every candidate it was chosen from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub best: ScoredCandidate,
    /// Local calendar date of the best sample.
    pub date: NaiveDate,
    pub ranking: Vec<ScoredCandidate>,
    /// Offset of the forecast location from UTC.
    #[serde(skip)]
    pub utc_offset: FixedOffset,
}

impl Recommendation {
    /// `observed_at` of a candidate in the location's local time.
    pub fn local_time(&self, candidate: &ScoredCandidate) -> DateTime<FixedOffset> {
        candidate.sample.observed_at.with_timezone(&self.utc_offset)
    }
}

/// Answers weather questions for a stored preference record.
#[derive(Debug)]
pub struct Recommender {
    provider: Box<dyn WeatherProvider>,
}

impl Recommender {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn current_weather(
        &self,
        prefs: &WeatherPreferences,
    ) -> Result<WeatherSample, RecommendError> {
        let location = require_location(prefs)?;

        self.provider.current(&location).await.map_err(|err| {
            tracing::warn!(error = %format!("{err:#}"), "current weather lookup failed");
            RecommendError::Upstream(err)
        })
    }

    /// Pick the forecast day that best matches `prefs`. `now` decides which
    /// local date counts as today.
    pub async fn recommend_day(
        &self,
        prefs: &WeatherPreferences,
        now: DateTime<Utc>,
    ) -> Result<Recommendation, RecommendError> {
        let location = require_location(prefs)?;

        let feed = self.provider.forecast(&location).await.map_err(|err| {
            tracing::warn!(error = %format!("{err:#}"), "forecast lookup failed");
            RecommendError::Upstream(err)
        })?;

        if feed.samples.is_empty() {
            return Err(RecommendError::EmptyForecast);
        }

        let today = now.with_timezone(&feed.utc_offset).date_naive();
        let days = reduce_to_daily(&feed.samples, feed.utc_offset, today);

        let Selection { best, ranking } = select_best(&days, &prefs.vector())?;
        let date = local_date(&best.sample, feed.utc_offset);

        tracing::info!(
            %date,
            observed_at = %best.sample.observed_at,
            condition = %best.sample.condition,
            score = %best.score,
            candidates = ranking.len(),
            "picked best forecast day"
        );

        Ok(Recommendation {
            best,
            date,
            ranking,
            utc_offset: feed.utc_offset,
        })
    }
}

fn require_location(prefs: &WeatherPreferences) -> Result<Location, RecommendError> {
    prefs.location().ok_or(RecommendError::MissingLocation)
}
