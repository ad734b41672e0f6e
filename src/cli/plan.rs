//! Custom plan and weekly schedule commands

use std::path::Path;

use anyhow::{bail, Result};
use chrono::Local;

use super::{read_document, AppContext};
use crate::domain::planner::{delete_plan, todays_plan, upsert_plan};
use crate::domain::{CustomWorkoutPlan, DayOfWeek, GeneratedWeeklyPlan};

pub fn list_command(ctx: &AppContext, json: bool) -> Result<()> {
    let plans = ctx.repo().custom_plans()?;
    let schedule = ctx.repo().schedule()?;
    if json {
        let value = serde_json::json!({ "plans": plans, "schedule": schedule });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if plans.is_empty() {
        println!("No custom plans. Import one with `ironlog plan import <file>`.");
    } else {
        println!("Plans ({}):", plans.len());
        for plan in &plans {
            println!("  {}  {} ({} exercises)", plan.id, plan.name, plan.exercises.len());
        }
    }

    println!("\nWeek:");
    for day in DayOfWeek::all() {
        let assigned = schedule
            .plan_id_for(*day)
            .map(|id| {
                plans
                    .iter()
                    .find(|p| p.id == id)
                    .map_or_else(|| format!("(missing plan {})", id), |p| p.name.clone())
            })
            .unwrap_or_else(|| "rest".to_string());
        println!("  {:<10} {}", day, assigned);
    }
    Ok(())
}

/// Store a plan from a file, replacing any plan with the same id
pub fn import_command(ctx: &AppContext, file: &Path) -> Result<()> {
    let mut plan: CustomWorkoutPlan = read_document(file)?;
    plan.ensure_ids();

    let mut plans = ctx.repo().custom_plans()?;
    let id = plan.id.clone();
    let name = plan.name.clone();
    upsert_plan(&mut plans, plan);
    ctx.repo().save_custom_plans(&plans)?;
    println!("Saved plan '{}' ({})", name, id);
    Ok(())
}

pub fn delete_command(ctx: &AppContext, id: &str) -> Result<()> {
    let mut plans = ctx.repo().custom_plans()?;
    let mut schedule = ctx.repo().schedule()?;
    if !delete_plan(&mut plans, &mut schedule, id) {
        bail!("No custom plan with id '{}'", id);
    }
    ctx.repo().save_custom_plans(&plans)?;
    ctx.repo().save_schedule(&schedule)?;
    println!("Deleted plan {}", id);
    Ok(())
}

pub fn assign_command(ctx: &AppContext, day: DayOfWeek, id: &str) -> Result<()> {
    let plans = ctx.repo().custom_plans()?;
    let Some(plan) = plans.iter().find(|p| p.id == id) else {
        bail!("No custom plan with id '{}'", id);
    };
    let mut schedule = ctx.repo().schedule()?;
    schedule.assign(day, id);
    ctx.repo().save_schedule(&schedule)?;
    println!("{}: {}", day, plan.name);
    Ok(())
}

pub fn unassign_command(ctx: &AppContext, day: DayOfWeek) -> Result<()> {
    let mut schedule = ctx.repo().schedule()?;
    if schedule.unassign(day).is_some() {
        ctx.repo().save_schedule(&schedule)?;
        println!("{}: rest", day);
    } else {
        println!("Nothing scheduled on {}", day);
    }
    Ok(())
}

/// Show the plan scheduled for today
pub fn today_command(ctx: &AppContext) -> Result<()> {
    let today = Local::now().date_naive();
    let plans = ctx.repo().custom_plans()?;
    let schedule = ctx.repo().schedule()?;

    match todays_plan(&plans, &schedule, today) {
        Some(plan) => {
            println!("Today ({}): {} [{}]", DayOfWeek::of(today), plan.name, plan.id);
            for ex in &plan.exercises {
                println!("  - {} ({} x {})", ex.name, ex.sets, ex.reps);
            }
            println!("\nStart it with `ironlog session start --custom {}`", plan.id);
        }
        None => println!("Nothing scheduled for {}.", DayOfWeek::of(today)),
    }
    Ok(())
}

/// Replace all plans and the schedule with a generated week
pub fn apply_weekly_command(ctx: &AppContext, file: &Path) -> Result<()> {
    let generated: GeneratedWeeklyPlan = read_document(file)?;
    let (plans, schedule) = ctx.repo().save_generated_weekly_plan(&generated)?;
    println!(
        "Imported {} plans, {} days scheduled",
        plans.len(),
        schedule.iter().count()
    );
    Ok(())
}
