//! Custom workout plans and the weekly schedule

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Exercise, WorkoutPlan};

/// Focus label given to workouts started from a custom plan
pub const CUSTOM_PLAN_FOCUS: &str = "Personalizado";

const CUSTOM_EXERCISE_DESCRIPTION: &str = "Execute com boa forma e controle.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn all() -> &'static [DayOfWeek] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == lower || d.as_str()[..3] == lower)
            .ok_or_else(|| format!("Unknown day of week: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomExercise {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomWorkoutPlan {
    /// Empty until the plan is stored
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<CustomExercise>,
}

impl CustomWorkoutPlan {
    /// Give the plan and its exercises fresh ids where they have none
    pub fn ensure_ids(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        for ex in self.exercises.iter_mut().filter(|ex| ex.id.is_empty()) {
            ex.id = Uuid::new_v4().to_string();
        }
    }

    /// Turn the plan into something a session can run.
    ///
    /// Duration is left at 0; completion substitutes the configured default.
    pub fn to_workout_plan(&self) -> WorkoutPlan {
        WorkoutPlan {
            title: self.name.clone(),
            duration: 0,
            focus: CUSTOM_PLAN_FOCUS.to_string(),
            exercises: self
                .exercises
                .iter()
                .map(|ex| Exercise {
                    id: ex.id.clone(),
                    name: ex.name.clone(),
                    sets: ex.sets.clone(),
                    reps: ex.reps.clone(),
                    description: CUSTOM_EXERCISE_DESCRIPTION.to_string(),
                    completed_sets: None,
                })
                .collect(),
        }
    }
}

/// Day of week -> custom plan id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<DayOfWeek, String>);

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, day: DayOfWeek, plan_id: impl Into<String>) {
        self.0.insert(day, plan_id.into());
    }

    pub fn unassign(&mut self, day: DayOfWeek) -> Option<String> {
        self.0.remove(&day)
    }

    pub fn plan_id_for(&self, day: DayOfWeek) -> Option<&str> {
        self.0.get(&day).map(String::as_str)
    }

    /// Drop every day that points at `plan_id`
    pub fn clear_plan(&mut self, plan_id: &str) {
        self.0.retain(|_, id| id != plan_id);
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &str)> {
        self.0.iter().map(|(day, id)| (*day, id.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Exercise as it comes back from the weekly-plan generator (no id yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedExercise {
    pub name: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<GeneratedExercise>,
}

/// A generated week: plans plus a schedule keyed by plan *name*
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedWeeklyPlan {
    #[serde(default)]
    pub plans: Vec<GeneratedPlan>,
    #[serde(default)]
    pub schedule: BTreeMap<DayOfWeek, String>,
}

/// Insert `plan`, or replace the stored plan with the same id
pub fn upsert_plan(plans: &mut Vec<CustomWorkoutPlan>, plan: CustomWorkoutPlan) {
    match plans.iter_mut().find(|p| p.id == plan.id) {
        Some(existing) => *existing = plan,
        None => plans.push(plan),
    }
}

/// Delete a plan and unschedule it. Returns false when no plan matched.
pub fn delete_plan(
    plans: &mut Vec<CustomWorkoutPlan>,
    schedule: &mut WeeklySchedule,
    plan_id: &str,
) -> bool {
    let before = plans.len();
    plans.retain(|p| p.id != plan_id);
    schedule.clear_plan(plan_id);
    plans.len() != before
}

/// The plan scheduled for the weekday of `date`, if it still exists
pub fn todays_plan<'a>(
    plans: &'a [CustomWorkoutPlan],
    schedule: &WeeklySchedule,
    date: NaiveDate,
) -> Option<&'a CustomWorkoutPlan> {
    let plan_id = schedule.plan_id_for(DayOfWeek::of(date))?;
    plans.iter().find(|p| p.id == plan_id)
}

/// Give every generated plan and exercise a fresh id and resolve the
/// schedule from plan names to ids. Unknown names are dropped.
///
/// The result is meant to replace the stored plans and schedule wholesale.
pub fn apply_generated_weekly_plan(
    generated: &GeneratedWeeklyPlan,
) -> (Vec<CustomWorkoutPlan>, WeeklySchedule) {
    let mut ids_by_name: HashMap<&str, String> = HashMap::new();

    let plans: Vec<CustomWorkoutPlan> = generated
        .plans
        .iter()
        .map(|plan| {
            let id = Uuid::new_v4().to_string();
            ids_by_name.insert(plan.name.as_str(), id.clone());
            CustomWorkoutPlan {
                id,
                name: plan.name.clone(),
                exercises: plan
                    .exercises
                    .iter()
                    .map(|ex| CustomExercise {
                        id: Uuid::new_v4().to_string(),
                        name: ex.name.clone(),
                        sets: ex.sets.clone(),
                        reps: ex.reps.clone(),
                    })
                    .collect(),
            }
        })
        .collect();

    let mut schedule = WeeklySchedule::new();
    for (day, plan_name) in &generated.schedule {
        if let Some(id) = ids_by_name.get(plan_name.as_str()) {
            schedule.assign(*day, id.clone());
        } else {
            tracing::debug!("Dropping schedule entry for unknown plan '{}'", plan_name);
        }
    }

    (plans, schedule)
}
