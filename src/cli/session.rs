//! Active session commands
//!
//! The session lives in the store between invocations. Exercise and set
//! numbers on the command line are 1-based.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use super::record::print_outcome;
use super::{fmt_kg, read_document, AppContext};
use crate::domain::{Exercise, WorkoutPlan};
use crate::session::ActiveSession;
use crate::stats::ExerciseMetrics;

fn load_session(ctx: &AppContext) -> Result<ActiveSession> {
    ctx.repo()
        .active_session()?
        .context("No active session (start one with `ironlog session start`)")
}

fn to_index(number: usize, what: &str) -> Result<usize> {
    if number == 0 {
        bail!("{} numbers start at 1", what);
    }
    Ok(number - 1)
}

/// Start a session from a plan file or a stored custom plan
pub fn start_command(ctx: &AppContext, file: Option<&Path>, custom: Option<&str>) -> Result<()> {
    if ctx.repo().active_session()?.is_some() {
        bail!("A session is already in progress (finish or cancel it first)");
    }

    let plan: WorkoutPlan = match (file, custom) {
        (Some(path), _) => read_document(path)?,
        (None, Some(id)) => ctx
            .repo()
            .custom_plans()?
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.to_workout_plan())
            .with_context(|| format!("No custom plan with id '{}'", id))?,
        (None, None) => bail!("Give a plan file or --custom <id>"),
    };

    let session = ActiveSession::start(plan, Utc::now(), ctx.config.workout.default_set_count)?;
    ctx.repo().save_active_session(&session)?;
    print_session(ctx, &session)
}

pub fn show_command(ctx: &AppContext) -> Result<()> {
    let session = load_session(ctx)?;
    print_session(ctx, &session)
}

/// Log weight (and reps) on a set and tick it off
pub fn log_command(
    ctx: &AppContext,
    exercise: usize,
    set: usize,
    weight: &str,
    reps: Option<String>,
) -> Result<()> {
    let mut session = load_session(ctx)?;
    session.log_set(to_index(exercise, "Exercise")?, to_index(set, "Set")?, weight, reps)?;
    ctx.repo().save_active_session(&session)?;
    println!("Logged set {} of exercise {}: {} kg", set, exercise, weight);
    Ok(())
}

pub fn check_command(ctx: &AppContext, exercise: usize, set: usize) -> Result<()> {
    let mut session = load_session(ctx)?;
    let checked = session.toggle_set(to_index(exercise, "Exercise")?, to_index(set, "Set")?)?;
    ctx.repo().save_active_session(&session)?;
    println!(
        "Set {} of exercise {} {}",
        set,
        exercise,
        if checked { "checked" } else { "unchecked" }
    );
    Ok(())
}

pub fn add_set_command(ctx: &AppContext, exercise: usize) -> Result<()> {
    let mut session = load_session(ctx)?;
    let count = session.add_set(to_index(exercise, "Exercise")?)?;
    ctx.repo().save_active_session(&session)?;
    println!("Exercise {} now has {} sets", exercise, count);
    Ok(())
}

/// Swap an exercise for one read from a file; its sets start over
pub fn replace_command(ctx: &AppContext, exercise: usize, file: &Path) -> Result<()> {
    let replacement: Exercise = read_document(file)?;
    let mut session = load_session(ctx)?;
    let index = to_index(exercise, "Exercise")?;
    session.replace_exercise(index, replacement, ctx.config.workout.default_set_count)?;
    ctx.repo().save_active_session(&session)?;
    print_session(ctx, &session)
}

pub fn next_command(ctx: &AppContext) -> Result<()> {
    let mut session = load_session(ctx)?;
    if !session.advance() {
        println!("Already on the last exercise.");
        return Ok(());
    }
    ctx.repo().save_active_session(&session)?;
    print_session(ctx, &session)
}

pub fn prev_command(ctx: &AppContext) -> Result<()> {
    let mut session = load_session(ctx)?;
    if !session.back() {
        println!("Already on the first exercise.");
        return Ok(());
    }
    ctx.repo().save_active_session(&session)?;
    print_session(ctx, &session)
}

/// Close the session and record it
pub fn finish_command(ctx: &AppContext, json: bool) -> Result<()> {
    let session = load_session(ctx)?;
    let workout = session.finish(Utc::now(), ctx.config.workout.default_duration_minutes);
    let outcome = ctx.tracker.append_workout(workout)?;
    ctx.repo().clear_active_session()?;
    print_outcome(&outcome, json)
}

pub fn cancel_command(ctx: &AppContext) -> Result<()> {
    if ctx.repo().active_session()?.is_none() {
        println!("No active session.");
        return Ok(());
    }
    ctx.repo().clear_active_session()?;
    println!("Session discarded.");
    Ok(())
}

fn print_session(ctx: &AppContext, session: &ActiveSession) -> Result<()> {
    println!(
        "{} - {} ({} exercises)",
        session.plan.title,
        session.plan.focus,
        session.exercise_count()
    );
    println!();

    for (i, exercise) in session.plan.exercises.iter().enumerate() {
        let cursor = if i == session.current_index { ">" } else { " " };
        println!("{} {}. {} ({} x {})", cursor, i + 1, exercise.name, exercise.sets, exercise.reps);
        for (n, set) in session.sets_for(i)?.iter().enumerate() {
            let mark = if set.checked { "x" } else { " " };
            let weight = if set.weight.is_empty() { "-" } else { set.weight.as_str() };
            let reps = set.reps.as_deref().filter(|r| !r.is_empty()).unwrap_or("-");
            println!("      [{}] set {}: {} kg x {}", mark, n + 1, weight, reps);
        }
    }

    let history = ctx.tracker.history()?;
    if let (Some(current), Some(last)) = (session.current_exercise(), session.last_performance(&history)) {
        let best = ExerciseMetrics::from_sets(last, &current.reps).max_weight;
        println!();
        println!("Last time on {}: {} sets, best {} kg", current.name, last.len(), fmt_kg(best));
    }
    Ok(())
}
