//! Shared fixtures for ironlog integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use ironlog::domain::{CompletedSet, Exercise, HistoricalWorkout, WorkoutPlan};
use ironlog::store::SqliteStore;

/// A store in a fresh temp dir; keep the dir alive for the store's lifetime
pub fn temp_store() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(&dir.path().join("ironlog.db")).expect("Failed to open store");
    (dir, store)
}

/// Fixed reference date for streak-sensitive tests
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 12).expect("valid date")
}

pub fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

/// Local noon on `day`, as UTC
pub fn local_noon(day: NaiveDate) -> DateTime<Utc> {
    Local
        .from_local_datetime(&day.and_hms_opt(12, 0, 0).expect("valid time"))
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

/// Exercise with one logged set per weight, reps falling back to the plan's 10
pub fn exercise(name: &str, weights: &[&str]) -> Exercise {
    Exercise {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        sets: format!("{} séries", weights.len()),
        reps: "10".to_string(),
        description: String::new(),
        completed_sets: Some(weights.iter().map(|w| CompletedSet::logged(*w, None)).collect()),
    }
}

pub fn workout_on(day: NaiveDate, focus: &str, exercises: Vec<Exercise>) -> HistoricalWorkout {
    HistoricalWorkout::new(
        WorkoutPlan {
            title: format!("Treino de {}", focus),
            duration: 45,
            focus: focus.to_string(),
            exercises,
        },
        local_noon(day),
    )
}
