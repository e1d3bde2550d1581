//! Reduce a 3-hourly forecast feed to one sample per day.

use chrono::{FixedOffset, NaiveDate, Timelike};

use crate::model::WeatherSample;

/// Upper bound on days kept, the nearest-now sample included.
pub const MAX_DAYS: usize = 5;

/// UTC hour whose sample stands in for the whole day. Forecast feeds are laid
/// out on a 00/03/../21 UTC grid, so this slot exists exactly once per day
/// whatever the location's offset.
pub const MIDDAY_HOUR: u32 = 12;

/// Keep the first sample as "today", then the midday sample of every later
/// day, in feed order, up to [`MAX_DAYS`] entries.
///
/// The midday slot is matched on the UTC grid. `offset` gives the location's
/// local date for each sample and `today` is the local date the first sample
/// stands in for; midday samples falling on `today` are skipped. A short feed
/// gives a short result; an empty feed gives an empty result.
pub fn reduce_to_daily(
    samples: &[WeatherSample],
    offset: FixedOffset,
    today: NaiveDate,
) -> Vec<WeatherSample> {
    let mut days = Vec::with_capacity(MAX_DAYS);

    let Some((first, rest)) = samples.split_first() else {
        return days;
    };
    days.push(first.clone());

    for sample in rest {
        if days.len() >= MAX_DAYS {
            break;
        }

        if sample.observed_at.hour() != MIDDAY_HOUR || local_date(sample, offset) == today {
            continue;
        }

        days.push(sample.clone());
    }

    tracing::debug!(
        input = samples.len(),
        kept = days.len(),
        %offset,
        "reduced forecast feed to daily samples"
    );

    days
}

/// Calendar date of `sample` at the forecast location.
pub fn local_date(sample: &WeatherSample, offset: FixedOffset) -> NaiveDate {
    sample.observed_at.with_timezone(&offset).date_naive()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Offset, Utc};

    use super::*;
    use crate::model::fixtures::{at, sample_at};

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    fn feed(start: DateTime<Utc>, count: usize) -> Vec<WeatherSample> {
        (0..count)
            .map(|i| sample_at(800, i as f64, 1.0, start + Duration::hours(3 * i as i64)))
            .collect()
    }

    #[test]
    fn full_feed_keeps_first_sample_and_four_middays() {
        let start = at(2024, 6, 1, 9);
        let samples = feed(start, 40);

        let days = reduce_to_daily(&samples, utc(), start.date_naive());

        assert_eq!(days.len(), MAX_DAYS);
        assert_eq!(days[0], samples[0]);
        let expected: Vec<_> = (2..=5).map(|day| at(2024, 6, day, 12)).collect();
        let kept: Vec<_> = days[1..].iter().map(|s| s.observed_at).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn first_sample_is_kept_verbatim_even_off_midday() {
        let start = at(2024, 6, 1, 22);
        let samples = feed(start, 3);

        let days = reduce_to_daily(&samples, utc(), start.date_naive());

        assert_eq!(days, vec![samples[0].clone()]);
    }

    #[test]
    fn todays_midday_is_represented_by_first_sample() {
        let start = at(2024, 6, 1, 6);
        let samples = feed(start, 16);

        let days = reduce_to_daily(&samples, utc(), start.date_naive());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].observed_at, at(2024, 6, 1, 6));
        assert_eq!(days[1].observed_at, at(2024, 6, 2, 12));
    }

    #[test]
    fn short_feed_is_never_padded() {
        let start = at(2024, 6, 1, 15);
        let samples = feed(start, 12);

        let days = reduce_to_daily(&samples, utc(), start.date_naive());

        let middays = samples[1..]
            .iter()
            .filter(|s| s.observed_at.hour() == MIDDAY_HOUR)
            .count();
        assert_eq!(days.len(), 1 + middays);
        assert!(days.len() < MAX_DAYS);
    }

    #[test]
    fn empty_feed_gives_empty_result() {
        let days = reduce_to_daily(&[], utc(), at(2024, 6, 1, 0).date_naive());
        assert!(days.is_empty());
    }

    #[test]
    fn offsets_off_the_three_hour_grid_still_keep_every_day() {
        let start = at(2024, 6, 1, 9);
        let samples = feed(start, 40);

        for offset_secs in [3600, 2 * 3600, 5 * 3600 + 1800, -4 * 3600, -5 * 3600, 9 * 3600 + 1800] {
            let offset = FixedOffset::east_opt(offset_secs).unwrap();
            let today = start.with_timezone(&offset).date_naive();

            let days = reduce_to_daily(&samples, offset, today);

            assert_eq!(days.len(), MAX_DAYS, "offset {offset}");
            assert_eq!(days[0], samples[0]);
            let kept: Vec<_> = days[1..].iter().map(|s| s.observed_at).collect();
            let expected: Vec<_> = (2..=5).map(|day| at(2024, 6, day, 12)).collect();
            assert_eq!(kept, expected, "offset {offset}");
        }
    }

    #[test]
    fn today_is_the_local_date() {
        // 23:00 UTC on June 1 is already June 2 at UTC+2.
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = at(2024, 6, 1, 21);
        let samples = feed(start, 40);
        let today = at(2024, 6, 1, 23).with_timezone(&offset).date_naive();

        let days = reduce_to_daily(&samples, offset, today);

        let kept: Vec<_> = days[1..].iter().map(|s| s.observed_at).collect();
        let expected: Vec<_> = (3..=6).map(|day| at(2024, 6, day, 12)).collect();
        assert_eq!(kept, expected);
        assert!(days[1..].iter().all(|s| local_date(s, offset) != today));
    }

    #[test]
    fn output_keeps_feed_order() {
        let start = at(2024, 6, 1, 0);
        let samples = feed(start, 40);

        let days = reduce_to_daily(&samples, utc(), start.date_naive());

        assert!(days.windows(2).all(|w| w[0].observed_at < w[1].observed_at));
    }
}
