//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! hydration-config.toml file. It provides a centralized way to configure
//! the default drinking profile and runtime parameters like the state-file
//! location.
//!
//! The config holds *defaults for a fresh day*; the live window, goal, and
//! consumption are persisted separately in the state file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from hydration-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default drinking profile for a fresh day
    pub profile: ProfileConfig,
    /// Runtime/tracker configuration
    pub tracker: TrackerConfig,
}

/// Default drinking profile, applied when a new day starts
#[derive(Debug, Deserialize, Serialize)]
pub struct ProfileConfig {
    /// Daily consumption goal in millilitres
    pub daily_plan_ml: i32,
    /// Hour the tracked window opens (0-23)
    pub from_hour: i32,
    /// Minute the tracked window opens (0-59)
    pub from_minute: i32,
    /// Hour the tracked window closes (0-23)
    pub to_hour: i32,
    /// Minute the tracked window closes (0-59)
    pub to_minute: i32,
}

/// Runtime configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Where the JSON state file lives
    pub state_path: String,
    /// Upper bound, in minutes, on a single watch-loop sleep. Keeps the
    /// loop responsive to plan edits made from another terminal.
    pub watch_max_sleep_minutes: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profile: ProfileConfig {
                daily_plan_ml: 2500,
                from_hour: 8,
                from_minute: 0,
                to_hour: 21,
                to_minute: 0,
            },
            tracker: TrackerConfig {
                state_path: "hydration-state.json".to_string(),
                watch_max_sleep_minutes: 60,
            },
        }
    }
}

impl Config {
    /// Load configuration from hydration-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("hydration-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration (2500 ml, 08:00-21:00)");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save current configuration to hydration-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("hydration-config.toml", contents)?;
        println!("Configuration saved to hydration-config.toml");
        Ok(())
    }
}
