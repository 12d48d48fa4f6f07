//! Global boardshelf configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ShelfError, ShelfResult};
use crate::geo::GeoPoint;
use crate::library::SortKey;

static DEFAULT_DATA_PATH: &str = "~/boardshelf";
const DEFAULT_SEARCH_RADIUS_KM: f64 = 25.0;
const ENV_PREFIX: &str = "BOARDSHELF";
/// Four weeks
const MAX_REMINDER_MINUTES: i64 = 4 * 7 * 24 * 60;

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_path(p: &PathBuf) -> bool {
    *p == default_data_path()
}

fn default_search_radius() -> f64 {
    DEFAULT_SEARCH_RADIUS_KM
}

/// Global configuration at ~/.config/boardshelf/config.toml
///
/// Any key can be overridden from the environment as `BOARDSHELF_<KEY>`
/// (e.g. `BOARDSHELF_DEFAULT_USER`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShelfConfig {
    #[serde(default = "default_data_path", skip_serializing_if = "is_default_data_path")]
    pub data_dir: PathBuf,

    /// User whose library is shown when no --user is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Name shown on RSVPs and hosted nights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Center for nearby searches, as "lat,lon"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    #[serde(default = "default_search_radius")]
    pub search_radius_km: f64,

    #[serde(default)]
    pub default_sort: SortKey,

    /// Alarm lead time for exported game nights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<i64>,

    /// IANA time zone for displaying times (e.g. "Europe/Paris")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        ShelfConfig {
            data_dir: default_data_path(),
            default_user: None,
            display_name: None,
            home: None,
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            default_sort: SortKey::default(),
            reminder_minutes: None,
            timezone: None,
        }
    }
}

impl ShelfConfig {
    pub fn config_path() -> ShelfResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ShelfError::Config("Could not determine config directory".into()))?
            .join("boardshelf");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented default file first.
    pub fn load() -> ShelfResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an explicit file, with `env` (normally `BOARDSHELF_*`
    /// variables) overriding file values.
    pub fn load_from(path: &Path, env: Environment) -> ShelfResult<Self> {
        let config: ShelfConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| ShelfError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ShelfError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ShelfResult<()> {
        if !self.search_radius_km.is_finite() || self.search_radius_km < 0.0 {
            return Err(ShelfError::Config(format!(
                "search_radius_km must be a non-negative number, got {}",
                self.search_radius_km
            )));
        }
        if let Some(minutes) = self.reminder_minutes {
            if !(0..=MAX_REMINDER_MINUTES).contains(&minutes) {
                return Err(ShelfError::Config(format!(
                    "reminder_minutes must be between 0 and {MAX_REMINDER_MINUTES}, got {minutes}"
                )));
            }
        }
        self.home_point()?;
        self.time_zone()?;
        Ok(())
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn home_point(&self) -> ShelfResult<Option<GeoPoint>> {
        self.home
            .as_deref()
            .map(|home| {
                home.parse::<GeoPoint>()
                    .map_err(|e| ShelfError::Config(format!("home: {e}")))
            })
            .transpose()
    }

    pub fn time_zone(&self) -> ShelfResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| ShelfError::Config(format!("Unknown timezone '{name}'")))
            })
            .transpose()
    }

    pub fn save_to(&self, path: &Path) -> ShelfResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ShelfError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ShelfError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ShelfResult<()> {
        let contents = format!(
            "\
# boardshelf configuration

# Where library.json and game_nights.json live:
# data_dir = \"{}\"

# Whose library to show by default:
# default_user = \"me\"
# display_name = \"Your Name\"

# Nearby game nights (\"lat,lon\" and radius in km):
# home = \"48.8566,2.3522\"
# search_radius_km = {}

# Library order: name_asc, name_desc, status, date_added, rating,
# personal_rating, min_players, max_players, playing_time, mechanic
# default_sort = \"name_asc\"

# Alarm for exported game nights, in minutes before start:
# reminder_minutes = 60

# timezone = \"Europe/Paris\"
",
            DEFAULT_DATA_PATH, DEFAULT_SEARCH_RADIUS_KM
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShelfError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ShelfError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
