//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

/// Written on first run; every value shown is the built-in default
pub const DEFAULT_CONFIG: &str = r#"# ironlog configuration

[gamification]
# XP for every completed workout
base_workout_xp = 50
# Extra XP for each exercise that beats its last performance
pr_xp_bonus = 25
# XP needed to leave level 1
base_level_xp = 200
# Each level needs this factor more XP than the previous one
level_growth_rate = 1.2

[workout]
# Used when a finished plan has no duration
default_duration_minutes = 45
# Used when an exercise does not say how many sets
default_set_count = 3

[storage]
# database = "/path/to/ironlog.db"
"#;

impl Config {
    /// Get the global config directory path (~/.ironlog/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ironlog")
    }

    /// Get the global config file path (~/.ironlog/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Default database location (~/.ironlog/ironlog.db)
    pub fn default_database_path() -> PathBuf {
        Self::global_config_dir().join("ironlog.db")
    }

    /// Load and validate configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        let _lock = lock_config(path)?;
        write_atomic(path, &content)
    }

    /// Load global configuration from ~/.ironlog/config.toml
    /// If no config exists, auto-creates one with defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::global_config_path())
    }

    /// Load configuration from `path`, creating it with defaults when missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::auto_init(path)?;
        }
        Self::from_file(path)
    }

    /// Write the default config to `path`.
    ///
    /// Returns false without touching the file when it exists and `force` is
    /// not set.
    pub fn write_default(path: &Path, force: bool) -> Result<bool> {
        let _lock = lock_config(path)?;
        if path.exists() && !force {
            return Ok(false);
        }
        write_atomic(path, DEFAULT_CONFIG)?;
        tracing::info!("Wrote default config to {}", path.display());
        Ok(true)
    }

    /// Auto-initialize configuration when no config exists
    ///
    /// The lock keeps concurrent first runs from racing each other.
    fn auto_init(path: &Path) -> Result<()> {
        let _lock = lock_config(path)?;

        // Re-check if config exists after acquiring lock (another process may have created it)
        if path.exists() {
            return Ok(());
        }

        write_atomic(path, DEFAULT_CONFIG)?;
        tracing::info!("Created default config at {}", path.display());
        Ok(())
    }
}

/// Take the exclusive lock guarding `path`; released when the file drops
fn lock_config(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
    }

    // Separate from the config itself so the rename cannot break the lock
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;
    Ok(lock_file)
}

/// Temp file + rename so a crash never leaves a half-written config
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;
    Ok(())
}
