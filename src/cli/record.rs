//! Record command: append a workout completed outside a session

use std::path::Path;

use anyhow::{Context, Result};

use super::{fmt_kg, read_document, AppContext};
use crate::domain::HistoricalWorkout;
use crate::stats::CompletionOutcome;

pub fn record_command(ctx: &AppContext, file: &Path, json: bool) -> Result<()> {
    let workout: HistoricalWorkout = read_document(file)?;
    let outcome = ctx
        .tracker
        .append_workout(workout)
        .with_context(|| "Failed to store workout")?;
    print_outcome(&outcome, json)
}

/// Print the post-workout summary and rewards
pub(crate) fn print_outcome(outcome: &CompletionOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    let summary = &outcome.summary;
    let game = &outcome.gamification;

    println!("{} ({} min)", summary.title, summary.duration);
    println!("Total volume: {} kg", summary.total_volume);
    println!();

    for ex in &summary.exercises {
        let marker = if ex.is_new_pr { " [PR]" } else { "" };
        let delta = match ex.weight_delta() {
            Some(d) if d > 0.0 => format!(" (+{} kg)", fmt_kg(d)),
            Some(d) if d < 0.0 => format!(" ({} kg)", fmt_kg(d)),
            Some(_) => " (=)".to_string(),
            None => " (first time)".to_string(),
        };
        println!(
            "  {:<30} {:>7} kg{}{}",
            ex.name,
            fmt_kg(ex.current.max_weight),
            delta,
            marker
        );
    }

    println!();
    println!("+{} XP", game.earned_xp);
    let profile = &game.updated_profile;
    if game.level_up {
        println!("Level up! Now level {}", profile.level);
    }
    println!("Level {}: {}/{} XP", profile.level, profile.xp, profile.xp_to_next_level);

    for achievement in &game.unlocked_achievements {
        println!("Achievement unlocked: {} - {}", achievement.title, achievement.description);
    }
    Ok(())
}
