// Configuration loaded from ~/.studypulse/rc
//
// One `key=value` per line; blank lines and `#` comments are skipped.
// Recognised keys:
//   data.location=<path>     database file (relative to the rc directory)
//   rating.scale=percent     or `decimal` for 10-point ratings
//   plan.overflow=15         minutes a plan may run past capacity (0-1440)

use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::planner::{PlanSettings, RatingScale, DEFAULT_OVERFLOW_MINUTES, MAX_OVERFLOW_MINUTES};

/// Directory under $HOME holding the rc file and default database
pub const CONFIG_DIR_NAME: &str = ".studypulse";
const RC_FILE_NAME: &str = "rc";
const DEFAULT_DB_FILE_NAME: &str = "studypulse.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine home directory")]
    NoHomeDir,
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid value '{value}' for '{key}' on line {line} of config file")]
    InvalidValue {
        key: String,
        value: String,
        line: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_location: PathBuf,
    pub scale: RatingScale,
    pub overflow_minutes: u32,
}

impl Config {
    /// Directory holding the rc file (~/.studypulse)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Load the rc file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = Self::config_dir()?;
        let rc_path = config_dir.join(RC_FILE_NAME);

        if !rc_path.exists() {
            debug!("No config file at {}, using defaults", rc_path.display());
            return Ok(Self::defaults(&config_dir));
        }

        let contents = std::fs::read_to_string(&rc_path).map_err(|source| ConfigError::Read {
            path: rc_path.clone(),
            source,
        })?;
        debug!("Loaded config from {}", rc_path.display());
        Self::parse(&contents, &config_dir)
    }

    pub fn defaults(config_dir: &Path) -> Self {
        Self {
            data_location: config_dir.join(DEFAULT_DB_FILE_NAME),
            scale: RatingScale::default(),
            overflow_minutes: DEFAULT_OVERFLOW_MINUTES,
        }
    }

    /// Parse rc file contents; relative paths resolve against `config_dir`
    pub fn parse(contents: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::defaults(config_dir);

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!("Ignoring malformed config line {}: {}", index + 1, line);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                line: index + 1,
            };

            match key {
                "data.location" => {
                    let path = PathBuf::from(value);
                    config.data_location = if path.is_relative() {
                        config_dir.join(path)
                    } else {
                        path
                    };
                }
                "rating.scale" => {
                    config.scale = RatingScale::from_str(value).ok_or_else(invalid)?;
                }
                "plan.overflow" => {
                    config.overflow_minutes = value
                        .parse::<u32>()
                        .ok()
                        .filter(|minutes| *minutes <= MAX_OVERFLOW_MINUTES)
                        .ok_or_else(invalid)?;
                }
                _ => warn!("Ignoring unknown config key '{}'", key),
            }
        }

        Ok(config)
    }

    pub fn plan_settings(&self) -> PlanSettings {
        PlanSettings {
            scale: self.scale,
            overflow_minutes: self.overflow_minutes,
        }
    }
}
