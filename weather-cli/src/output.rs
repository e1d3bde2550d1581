use serde::Serialize;
use weatherpick_core::{Recommendation, WeatherPreferences, WeatherSample};

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn format_sample(sample: &WeatherSample) -> String {
    let visibility = match sample.visibility_m {
        Some(visibility) => format!("{visibility:.0} m"),
        None => "n/a".to_string(),
    };

    [
        format!("{} ({})", sample.description, sample.condition),
        format!(
            "  Time:        {}",
            sample.observed_at.format("%a %Y-%m-%d %H:%M UTC")
        ),
        format!(
            "  Temperature: {:.1} °C (feels like {:.1} °C)",
            sample.temperature_c, sample.feels_like_c
        ),
        format!("  Wind:        {:.1} m/s", sample.wind_speed_mps),
        format!("  Humidity:    {:.0} %", sample.humidity_pct),
        format!("  Pressure:    {:.0} hPa", sample.pressure_hpa),
        format!("  Visibility:  {visibility}"),
    ]
    .join("\n")
}

/// Dates and candidate times are shown in the forecast location's local time.
pub fn format_recommendation(recommendation: &Recommendation, show_scores: bool) -> String {
    let best = &recommendation.best;
    let mut out = format!(
        "Best day: {} (score {})\n{}",
        recommendation.date.format("%A %Y-%m-%d"),
        best.score,
        format_sample(&best.sample)
    );

    if show_scores {
        out.push_str("\n\nCandidates:");
        for candidate in &recommendation.ranking {
            let marker = if candidate.index == best.index { '>' } else { ' ' };
            out.push_str(&format!(
                "\n{marker} {}  {:>5.1} °C  {:<24}  score {}",
                recommendation.local_time(candidate).format("%a %m-%d %H:%M"),
                candidate.sample.temperature_c,
                candidate.sample.description,
                candidate.score
            ));
        }
    }

    out
}

pub fn format_preferences(profile: &str, prefs: &WeatherPreferences) -> String {
    let rows: [(&str, Option<String>); 9] = [
        ("latitude", prefs.latitude.map(|v| v.to_string())),
        ("longitude", prefs.longitude.map(|v| v.to_string())),
        ("temp_min", prefs.temp_min.map(|v| format!("{v} °C"))),
        ("temp_max", prefs.temp_max.map(|v| format!("{v} °C"))),
        ("likes_rain", prefs.likes_rain.map(|v| v.to_string())),
        ("likes_sun", prefs.likes_sun.map(|v| v.to_string())),
        ("likes_wind", prefs.likes_wind.map(|v| v.to_string())),
        ("likes_fog", prefs.likes_fog.map(|v| v.to_string())),
        ("likes_snow", prefs.likes_snow.map(|v| v.to_string())),
    ];

    let lines: Vec<String> = rows
        .into_iter()
        .map(|(name, value)| {
            let value = value.unwrap_or_else(|| "-".to_string());
            format!("  {name:<11} {value}")
        })
        .collect();

    format!("Profile {profile}\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
    use weatherpick_core::{ConditionCode, Score, ScoredCandidate};

    use super::*;

    fn sample(day: u32, code: u16, description: &str) -> WeatherSample {
        WeatherSample {
            condition: ConditionCode(code),
            description: description.to_string(),
            icon_url: "http://openweathermap.org/img/w/01d.png".to_string(),
            temperature_c: 21.0,
            feels_like_c: 20.5,
            wind_speed_mps: 3.2,
            humidity_pct: 48.0,
            visibility_m: None,
            pressure_hpa: 1016.0,
            observed_at: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn sample_output_lists_measurements() {
        let text = format_sample(&sample(3, 800, "Clear sky"));
        assert!(text.starts_with("Clear sky (800)"));
        assert!(text.contains("2024-06-03 12:00 UTC"));
        assert!(text.contains("21.0 °C (feels like 20.5 °C)"));
        assert!(text.contains("Visibility:  n/a"));
    }

    #[test]
    fn recommendation_marks_the_winner() {
        let ranking = vec![
            ScoredCandidate {
                index: 0,
                sample: sample(1, 500, "Light rain"),
                score: Score::from_half_points(-5),
            },
            ScoredCandidate {
                index: 1,
                sample: sample(2, 800, "Clear sky"),
                score: Score::from_half_points(50),
            },
        ];
        let recommendation = Recommendation {
            best: ranking[1].clone(),
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            ranking,
            utc_offset: FixedOffset::east_opt(0).unwrap(),
        };

        let short = format_recommendation(&recommendation, false);
        assert!(short.starts_with("Best day: Sunday 2024-06-02 (score 25)"));
        assert!(!short.contains("Candidates:"));

        let long = format_recommendation(&recommendation, true);
        assert!(long.contains("Candidates:"));
        assert!(long.contains("> Sun 06-02 12:00"));
        assert!(long.contains("score -2.5"));
    }

    #[test]
    fn recommendation_uses_the_location_date() {
        let best = ScoredCandidate {
            index: 0,
            sample: sample(2, 800, "Clear sky"),
            score: Score::from_half_points(20),
        };
        // 12:00 UTC on June 2 is already June 3 at UTC+14.
        let recommendation = Recommendation {
            best: best.clone(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            ranking: vec![best],
            utc_offset: FixedOffset::east_opt(14 * 3600).unwrap(),
        };

        let text = format_recommendation(&recommendation, true);
        assert!(text.starts_with("Best day: Monday 2024-06-03 (score 10)"));
        assert!(text.contains("> Mon 06-03 02:00"));
    }

    #[test]
    fn unset_preferences_show_dash() {
        let prefs = WeatherPreferences {
            temp_min: Some(-3),
            likes_sun: Some(true),
            ..Default::default()
        };
        let text = format_preferences("alice", &prefs);
        assert!(text.starts_with("Profile alice"));
        assert!(text.contains("temp_min    -3 °C"));
        assert!(text.contains("likes_sun   true"));
        assert!(text.contains("likes_rain  -"));
    }
}
