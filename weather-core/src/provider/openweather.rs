use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::model::{ConditionCode, ForecastFeed, Location, WeatherSample};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        location: &Location,
        what: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            tracing::warn!(%status, what, "OpenWeather request failed");
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        let envelope: Value = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse OpenWeather {what} JSON"))?;
        check_cod(envelope.get("cod"))
            .with_context(|| format!("OpenWeather {what} response reported an error"))?;

        serde_json::from_value(envelope).with_context(|| {
            format!("OpenWeather {what} response is missing required fields")
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

/// Shape shared by the current-weather body and each forecast list entry.
#[derive(Debug, Deserialize)]
struct OwEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwEntry>,
}

impl OwEntry {
    fn into_sample(self) -> Result<WeatherSample> {
        let weather = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("OpenWeather entry at {} has no weather condition", self.dt))?;

        let observed_at = unix_to_utc(self.dt)
            .ok_or_else(|| anyhow!("OpenWeather entry has invalid timestamp {}", self.dt))?;

        Ok(WeatherSample {
            condition: ConditionCode(weather.id),
            description: capitalize(&weather.description),
            icon_url: format!("http://openweathermap.org/img/w/{}.png", weather.icon),
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            wind_speed_mps: self.wind.speed,
            humidity_pct: self.main.humidity,
            visibility_m: self.visibility,
            pressure_hpa: self.main.pressure,
            observed_at,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, location: &Location) -> Result<WeatherSample> {
        let entry: OwEntry = self.get_json(CURRENT_PATH, location, "current weather").await?;
        entry.into_sample()
    }

    async fn forecast(&self, location: &Location) -> Result<ForecastFeed> {
        let parsed: OwForecastResponse =
            self.get_json(FORECAST_PATH, location, "5-day forecast").await?;

        let utc_offset = FixedOffset::east_opt(parsed.city.timezone).ok_or_else(|| {
            anyhow!("OpenWeather returned invalid timezone shift {}", parsed.city.timezone)
        })?;

        let samples = parsed
            .list
            .into_iter()
            .map(OwEntry::into_sample)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(samples = samples.len(), %utc_offset, "fetched OpenWeather forecast");

        Ok(ForecastFeed {
            utc_offset,
            samples,
        })
    }
}

/// OpenWeather repeats the HTTP status in `cod`, as a number or a string.
fn check_cod(cod: Option<&Value>) -> Result<()> {
    let code = match cod {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };

    match code {
        Some(200) => Ok(()),
        Some(other) => Err(anyhow!("cod {other}")),
        None => Err(anyhow!("missing or malformed cod field")),
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
