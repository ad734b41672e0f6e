//! Init command implementation

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::config::Config;

/// Write the default config file
pub fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if Config::write_default(config_path, force)? {
        info!("Initialized ironlog");
        println!("Created {}", config_path.display());
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Ok(())
}
