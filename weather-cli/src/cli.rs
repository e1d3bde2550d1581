use anyhow::{Context, anyhow};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use inquire::Password;
use weatherpick_core::{
    Config, FileStore, PreferenceStore, PreferencesUpdate, RecommendError, Recommender,
    WeatherPreferences, provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherpick",
    version,
    about = "Current weather and the best forecast day for your preferences"
)]
pub struct Cli {
    /// Print JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure {
        /// Key to store; prompts for it when absent.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show or change a profile's location and weather preferences.
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },

    /// Show the current weather at a profile's location.
    Current {
        /// Profile name.
        profile: String,
    },

    /// Recommend the forecast day that best matches a profile's preferences.
    Recommend {
        /// Profile name.
        profile: String,

        /// Also list every candidate day with its score.
        #[arg(long)]
        show_scores: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// List stored profiles.
    List,

    /// Show a profile's stored preferences.
    Show { profile: String },

    /// Update a profile. Only the given options change; the profile is created if needed.
    Set {
        profile: String,

        #[command(flatten)]
        update: UpdateArgs,
    },
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Latitude in degrees (-90..=90).
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees (-180..=180).
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Lowest comfortable temperature in °C (-60..=60).
    #[arg(long, allow_negative_numbers = true)]
    pub temp_min: Option<i32>,

    /// Highest comfortable temperature in °C (-60..=60).
    #[arg(long, allow_negative_numbers = true)]
    pub temp_max: Option<i32>,

    #[arg(long)]
    pub likes_rain: Option<bool>,

    #[arg(long)]
    pub likes_sun: Option<bool>,

    #[arg(long)]
    pub likes_wind: Option<bool>,

    #[arg(long)]
    pub likes_fog: Option<bool>,

    #[arg(long)]
    pub likes_snow: Option<bool>,
}

impl From<UpdateArgs> for PreferencesUpdate {
    fn from(args: UpdateArgs) -> Self {
        PreferencesUpdate {
            latitude: args.lat,
            longitude: args.lon,
            temp_min: args.temp_min,
            temp_max: args.temp_max,
            likes_rain: args.likes_rain,
            likes_sun: args.likes_sun,
            likes_wind: args.likes_wind,
            likes_fog: args.likes_fog,
            likes_snow: args.likes_snow,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let json = self.json;

        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Prefs { action } => prefs(action, json),
            Command::Current { profile } => {
                let prefs = load_profile(&profile)?;
                let sample = recommender()?
                    .current_weather(&prefs)
                    .await
                    .map_err(user_error)?;

                if json {
                    output::print_json(&sample)
                } else {
                    println!("Current weather for {profile}");
                    println!("{}", output::format_sample(&sample));
                    Ok(())
                }
            }
            Command::Recommend {
                profile,
                show_scores,
            } => {
                let prefs = load_profile(&profile)?;
                let recommendation = recommender()?
                    .recommend_day(&prefs, Utc::now())
                    .await
                    .map_err(user_error)?;

                if json {
                    output::print_json(&recommendation)
                } else {
                    println!("{}", output::format_recommendation(&recommendation, show_scores));
                    Ok(())
                }
            }
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .without_confirmation()
            .with_help_message("Get one at https://home.openweathermap.org/api_keys")
            .prompt()
            .context("Failed to read API key")?,
    };

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn prefs(action: PrefsCommand, json: bool) -> anyhow::Result<()> {
    let mut store = FileStore::new(Config::preferences_file_path()?);

    match action {
        PrefsCommand::List => {
            let profiles = store.profiles()?;
            if json {
                return output::print_json(&profiles);
            }
            if profiles.is_empty() {
                println!("No profiles yet. Create one with `weatherpick prefs set <profile> ...`.");
            }
            for profile in profiles {
                println!("{profile}");
            }
            Ok(())
        }
        PrefsCommand::Show { profile } => {
            let prefs = load_profile_from(&store, &profile)?;
            if json {
                output::print_json(&prefs)
            } else {
                println!("{}", output::format_preferences(&profile, &prefs));
                Ok(())
            }
        }
        PrefsCommand::Set { profile, update } => {
            let update = PreferencesUpdate::from(update);
            if update.is_empty() {
                return Err(anyhow!(
                    "Nothing to update.\n\
                     Hint: pass at least one option, e.g. `--lat 50.08 --lon 14.42`."
                ));
            }

            let prefs = store.update(&profile, &update)?;
            if json {
                output::print_json(&prefs)
            } else {
                println!("{}", output::format_preferences(&profile, &prefs));
                Ok(())
            }
        }
    }
}

fn load_profile(profile: &str) -> anyhow::Result<WeatherPreferences> {
    let store = FileStore::new(Config::preferences_file_path()?);
    load_profile_from(&store, profile)
}

fn load_profile_from(
    store: &impl PreferenceStore,
    profile: &str,
) -> anyhow::Result<WeatherPreferences> {
    let prefs = store.get(profile)?;
    tracing::debug!(profile, found = prefs.is_some(), "looked up profile");

    prefs.ok_or_else(|| {
        anyhow!(
            "Profile '{profile}' not found.\n\
             Hint: run `weatherpick prefs set {profile} --lat <lat> --lon <lon>` first."
        )
    })
}

fn recommender() -> anyhow::Result<Recommender> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(Recommender::new(provider))
}

fn user_error(err: RecommendError) -> anyhow::Error {
    anyhow!(err.user_message())
}
