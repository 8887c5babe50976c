//! Mission configuration.
//!
//! Loaded from `~/.mission/config.toml`. Every key is optional and a
//! missing file means all defaults:
//!
//! ```toml
//! horizon = 180                    # days in the program
//! start-date = "2026-10-18"        # day 1 is the day after; defaults to today
//! data-dir = "/path/to/state"      # defaults to ~/.mission
//! blueprint = "/path/to/day.toml"  # defaults to the built-in mission
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jiff::civil::Date;
use serde::Deserialize;

use crate::blueprint;
use crate::calendar::{self, DEFAULT_HORIZON};
use crate::model::Blueprint;
use crate::storage::Storage;

/// Longest horizon accepted, in days.
pub const MAX_HORIZON: u32 = 10_000;

/// Mission configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Number of days generated for the program.
    #[serde(default = "default_horizon")]
    pub horizon: u32,

    /// Anchor for the calendar. Day 1 falls the day after.
    #[serde(default)]
    pub start_date: Option<Date>,

    /// Where the tracker state is stored.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// A TOML blueprint replacing the built-in mission.
    #[serde(default)]
    pub blueprint: Option<PathBuf>,
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON
}

impl Default for Config {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            start_date: None,
            data_dir: None,
            blueprint: None,
        }
    }
}

impl Config {
    /// Load config from `~/.mission/config.toml`, or defaults if it's absent.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it's absent.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        config
            .validate()
            .map_err(|e| format!("{e} in {}", path.display()))?;

        Ok(config)
    }

    /// The config file path: `~/.mission/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Storage::default_root().map(|root| root.join("config.toml"))
    }

    /// Checks value ranges that the TOML types alone can't express.
    pub fn validate(&self) -> Result<(), String> {
        if self.horizon == 0 || self.horizon > MAX_HORIZON {
            return Err(format!(
                "horizon must be between 1 and {MAX_HORIZON}, got {}",
                self.horizon
            ));
        }
        Ok(())
    }

    /// The calendar anchor: the configured start date, or today.
    pub fn start_date(&self) -> Date {
        self.start_date.unwrap_or_else(calendar::today)
    }

    /// The storage root: the configured data dir, or `~/.mission/`.
    pub fn storage_root(&self) -> Result<PathBuf, String> {
        self.data_dir
            .clone()
            .or_else(Storage::default_root)
            .ok_or_else(|| "could not determine home directory".to_string())
    }

    /// The configured blueprint, or the built-in mission.
    pub fn blueprint(&self) -> Result<Blueprint, String> {
        match &self.blueprint {
            Some(path) => blueprint::load(path)
                .map_err(|e| format!("failed to load blueprint {}: {e}", path.display())),
            None => Ok(Blueprint::mission()),
        }
    }
}
