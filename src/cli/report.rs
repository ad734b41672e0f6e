//! Read-only reports: stats, profile, progress and achievements

use anyhow::{bail, Result};

use super::{fmt_kg, AppContext};
use crate::stats::achievements::BoardFilter;

pub fn stats_command(ctx: &AppContext, json: bool) -> Result<()> {
    let stats = ctx.tracker.stats()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Workouts:       {}", stats.total_workouts);
    println!("Current streak: {} days", stats.current_streak);
    println!("Total volume:   {} kg", stats.total_volume);
    println!("Time trained:   {}h {:02}m", stats.time_spent / 60, stats.time_spent % 60);
    Ok(())
}

pub fn profile_command(ctx: &AppContext, json: bool) -> Result<()> {
    let profile = ctx.tracker.profile()?;
    let records = ctx.tracker.records()?;
    if json {
        let value = serde_json::json!({ "profile": profile, "personalRecords": records });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}", profile.avatar, profile.name);
    if !profile.instagram.is_empty() {
        println!("@{}", profile.instagram.trim_start_matches('@'));
    }
    println!(
        "Level {} - {}/{} XP ({:.0}%)",
        profile.level,
        profile.xp,
        profile.xp_to_next_level,
        profile.level_progress() * 100.0
    );
    println!("Gallery: {} photos", profile.gallery.len());

    if records.is_empty() {
        println!("\nNo personal records yet.");
    } else {
        println!("\nPersonal records ({}):", records.len());
        for (name, weight) in records.iter() {
            println!("  {:<30} {:>7} kg", name, fmt_kg(weight));
        }
    }
    Ok(())
}

pub fn progress_command(ctx: &AppContext, exercise: Option<&str>, json: bool) -> Result<()> {
    let mut progress = ctx.tracker.progress()?;
    if let Some(name) = exercise {
        progress.retain(|p| p.name == name);
        if progress.is_empty() {
            bail!("No history for exercise '{}'", name);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    if progress.is_empty() {
        println!("No workouts recorded yet.");
        return Ok(());
    }

    for p in &progress {
        let sign = if p.evolution > 0.0 { "+" } else { "" };
        println!(
            "{:<30} {:>6} -> {:>6} kg ({}{} kg, {} workouts)",
            p.name,
            fmt_kg(p.initial_weight),
            fmt_kg(p.current_weight),
            sign,
            fmt_kg(p.evolution),
            p.workout_count
        );
        if exercise.is_some() {
            for point in &p.data {
                println!(
                    "    {}  {} kg",
                    point.date.format("%Y-%m-%d"),
                    fmt_kg(point.max_weight)
                );
            }
        }
    }
    Ok(())
}

pub fn achievements_command(ctx: &AppContext, filter: BoardFilter, json: bool) -> Result<()> {
    let board = ctx.tracker.achievements(filter)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let unlocked = board.iter().filter(|s| s.unlocked).count();
    println!("Achievements ({} unlocked, filter: {}):\n", unlocked, filter);
    for status in &board {
        let a = status.achievement;
        if status.unlocked {
            println!("  [x] {} - {}", a.title, a.description);
        } else if a.is_secret {
            println!("  [ ] ??? - {}", a.description);
        } else {
            println!("  [ ] {} - {}", a.title, a.description);
        }
    }
    Ok(())
}
