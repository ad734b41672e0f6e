//! Configuration loading and management

mod io;

pub use io::DEFAULT_CONFIG;

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub use crate::stats::achievements::GamificationRules;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// XP rewards and level curve
    #[serde(default)]
    pub gamification: GamificationRules,

    /// Session defaults
    #[serde(default)]
    pub workout: WorkoutSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

/// Defaults applied while tracking a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutSettings {
    /// Used when a finished plan carries no duration
    pub default_duration_minutes: u32,
    /// Used when an exercise's `sets` text has no number
    pub default_set_count: u32,
}

impl Default for WorkoutSettings {
    fn default() -> Self {
        Self {
            default_duration_minutes: 45,
            default_set_count: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Database file; defaults to ~/.ironlog/ironlog.db
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Config {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let rules = &self.gamification;
        if rules.base_level_xp == 0 {
            bail!("gamification.base_level_xp must be greater than 0");
        }
        let rate = rules.level_growth_rate;
        if !rate.is_finite() || rate < 1.0 {
            bail!(
                "gamification.level_growth_rate must be a finite number >= 1 (got {})",
                rate
            );
        }
        Ok(())
    }

    /// Database path from the config, or the default location
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }
}
