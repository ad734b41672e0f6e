//! Generation preferences commands

use anyhow::Result;

use super::AppContext;
use crate::domain::{AiPreferences, FitnessLevel, TrainingLocation};

pub fn prefs_show_command(ctx: &AppContext, json: bool) -> Result<()> {
    let prefs = ctx.repo().preferences()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&prefs)?);
        return Ok(());
    }
    print_prefs(&prefs);
    Ok(())
}

/// Fields given on the command line; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct PrefsUpdate {
    pub level: Option<FitnessLevel>,
    pub location: Option<TrainingLocation>,
    pub equipment: Option<Vec<String>>,
    pub duration: Option<u32>,
    pub focus: Option<String>,
}

pub fn prefs_set_command(ctx: &AppContext, update: PrefsUpdate) -> Result<()> {
    let mut prefs = ctx.repo().preferences()?;
    if let Some(level) = update.level {
        prefs.level = Some(level);
    }
    if let Some(location) = update.location {
        prefs.location = Some(location);
    }
    if let Some(equipment) = update.equipment {
        prefs.equipment = equipment;
    }
    if let Some(duration) = update.duration {
        prefs.duration = Some(duration);
    }
    if let Some(focus) = update.focus {
        prefs.focus = Some(focus);
    }
    ctx.repo().save_preferences(&prefs)?;
    print_prefs(&prefs);
    Ok(())
}

fn print_prefs(prefs: &AiPreferences) {
    let or_unset = |v: Option<String>| v.unwrap_or_else(|| "(not set)".to_string());
    println!("Level:     {}", or_unset(prefs.level.map(|l| l.to_string())));
    println!("Location:  {}", or_unset(prefs.location.map(|l| l.to_string())));
    println!("Duration:  {}", or_unset(prefs.duration.map(|d| format!("{} min", d))));
    println!("Focus:     {}", or_unset(prefs.focus.clone()));
    if prefs.equipment.is_empty() {
        println!("Equipment: (none)");
    } else {
        println!("Equipment: {}", prefs.equipment.join(", "));
    }
}
