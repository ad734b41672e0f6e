//! CLI command implementations

pub mod init;
pub mod plan;
pub mod prefs;
pub mod record;
pub mod report;
pub mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::stats::Tracker;
use crate::store::{Repository, SqliteStore};

/// Loaded config plus an open store, shared by all commands
pub struct AppContext {
    pub config: Config,
    pub tracker: Tracker<SqliteStore>,
}

impl AppContext {
    /// Load the config (creating it if needed) and open the database.
    ///
    /// `db_override` wins over the `[storage]` section.
    pub fn open(config_path: Option<&Path>, db_override: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let db_path = db_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.database_path());
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: SqliteStore) -> Self {
        let tracker = Tracker::new(store, config.gamification.clone());
        Self { config, tracker }
    }

    pub fn repo(&self) -> &Repository<SqliteStore> {
        self.tracker.repository()
    }
}

/// Read a JSON document, or TOML when the file ends in `.toml`
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Resolve the config path given on the command line
pub fn config_path_or_default(path: Option<&PathBuf>) -> PathBuf {
    path.cloned().unwrap_or_else(Config::global_config_path)
}

/// Format a weight without a trailing ".0"
pub(crate) fn fmt_kg(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{}", weight)
    }
}
