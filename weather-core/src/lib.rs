//! Core library for `weatherpick`.
//!
//! This crate defines:
//! - Shared domain models (samples, condition codes, locations)
//! - Per-profile weather preferences and their storage
//! - Reduction of a 3-hourly forecast to one sample per day
//! - Preference scoring and best-day selection
//! - Abstraction over weather providers, with an OpenWeather client
//! - Configuration & credentials handling
//!
//! It is used by `weatherpick-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod preferences;
pub mod provider;
pub mod scoring;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{PreferenceError, RecommendError};
pub use forecast::reduce_to_daily;
pub use model::{ConditionCode, ConditionFamily, ForecastFeed, Location, WeatherSample};
pub use preferences::{PreferenceVector, PreferencesUpdate, WeatherPreferences};
pub use provider::{WeatherProvider, provider_from_config};
pub use scoring::{Score, ScoredCandidate, Selection, rank, score, select_best};
pub use service::{Recommendation, Recommender};
pub use store::{FileStore, MemoryStore, PreferenceStore};
