use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Exercise;

/// A plan as produced by the generator or a custom plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub title: String,
    /// Nominal duration in minutes (0 when not fixed)
    #[serde(default)]
    pub duration: u32,
    /// Focus label, e.g. "Peito e Tríceps"
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    /// Find an exercise by its exact name
    pub fn exercise_named(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| ex.name == name)
    }
}

/// A completed workout as stored in the history log.
///
/// Created once at completion time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalWorkout {
    #[serde(flatten)]
    pub plan: WorkoutPlan,
    pub completed_at: DateTime<Utc>,
}

impl HistoricalWorkout {
    pub fn new(plan: WorkoutPlan, completed_at: DateTime<Utc>) -> Self {
        Self { plan, completed_at }
    }

    /// Calendar day of completion in the local timezone
    pub fn local_day(&self) -> NaiveDate {
        self.completed_at.with_timezone(&Local).date_naive()
    }
}
