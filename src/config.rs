use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};
use crate::event::{self, Event};
use crate::navigation::ViewMode;

const CONFIG_PATH_ENV_VAR: &str = "CALGRID_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calgrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calgrid.toml"));
    }

    locations
}

/// Dates in the file are quoted strings: `date = "2024-10-15"`,
/// `start_date = "2024-10-15T09:00:00"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub view: ViewMode,
    pub date: Option<NaiveDate>,
    pub events: Vec<Event>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::IOError(e),
                &format!("Could not read config file '{}'", path.display()),
            )
        })?;

        content.parse::<Config>().map_err(|e| {
            let msg = format!(
                "{} ({})",
                e.message.as_deref().unwrap_or_default(),
                path.display()
            );
            e.with_msg(&msg)
        })
    }

    /// Configured events that may enter the store. Unordered windows and
    /// repeated ids are dropped.
    pub fn seed_events(&self) -> Vec<Event> {
        let mut seen = HashSet::new();

        self.events
            .iter()
            .filter(|e| {
                if !event::validate(&e.to_draft()) {
                    log::warn!("Skipping configured event '{}': invalid title or time window", e.id);
                    false
                } else if !seen.insert(e.id.clone()) {
                    log::warn!("Skipping configured event '{}': duplicate id", e.id);
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect()
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            log::info!("Loading config from '{}'", location.display());
            return Config::from_file(&location);
        }
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}
