//! Set-by-set tracking of a workout in progress
//!
//! A session starts from a [`WorkoutPlan`], collects [`CompletedSet`]s per
//! exercise and finishes into a [`HistoricalWorkout`]. It is serializable so
//! the CLI can keep it in the store between invocations.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{CompletedSet, Exercise, HistoricalWorkout, WorkoutPlan};
use crate::stats::metrics::bump_numeric_prefix;
use crate::store::history::find_last_performance;

/// Upper bound on the sets created for one exercise from its plan text
pub const MAX_PLANNED_SETS: u32 = 50;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("the plan has no exercises")]
    EmptyPlan,

    #[error("exercise {index} does not exist (plan has {len})")]
    ExerciseOutOfRange { index: usize, len: usize },

    #[error("set {index} of '{exercise}' does not exist ({len} sets)")]
    SetOutOfRange {
        exercise: String,
        index: usize,
        len: usize,
    },
}

/// A workout in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub plan: WorkoutPlan,
    pub started_at: DateTime<Utc>,
    /// Exercise currently shown
    pub current_index: usize,
    /// Logged sets keyed by exercise id
    pub sets: BTreeMap<String, Vec<CompletedSet>>,
}

impl ActiveSession {
    /// Start a session with blank sets for every exercise.
    ///
    /// Exercises without a usable id get a fresh one so sets never collide.
    pub fn start(
        mut plan: WorkoutPlan,
        now: DateTime<Utc>,
        default_set_count: u32,
    ) -> Result<Self, SessionError> {
        if plan.exercises.is_empty() {
            return Err(SessionError::EmptyPlan);
        }

        let mut seen = HashSet::new();
        for exercise in &mut plan.exercises {
            if exercise.id.is_empty() || !seen.insert(exercise.id.clone()) {
                exercise.id = Uuid::new_v4().to_string();
                seen.insert(exercise.id.clone());
            }
        }

        let sets = plan
            .exercises
            .iter()
            .map(|ex| (ex.id.clone(), blank_sets(ex, default_set_count)))
            .collect();

        tracing::debug!("Started '{}' with {} exercises", plan.title, plan.exercises.len());
        Ok(Self {
            plan,
            started_at: now,
            current_index: 0,
            sets,
        })
    }

    pub fn exercise_count(&self) -> usize {
        self.plan.exercises.len()
    }

    pub fn exercise(&self, index: usize) -> Result<&Exercise, SessionError> {
        self.plan
            .exercises
            .get(index)
            .ok_or(SessionError::ExerciseOutOfRange {
                index,
                len: self.plan.exercises.len(),
            })
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.plan.exercises.get(self.current_index)
    }

    /// Sets logged so far for the exercise at `index`
    pub fn sets_for(&self, index: usize) -> Result<&[CompletedSet], SessionError> {
        let exercise = self.exercise(index)?;
        Ok(self.sets.get(&exercise.id).map(Vec::as_slice).unwrap_or(&[]))
    }

    fn set_mut(&mut self, exercise: usize, set: usize) -> Result<&mut CompletedSet, SessionError> {
        let ex = self.exercise(exercise)?;
        let (id, name) = (ex.id.clone(), ex.name.clone());
        let sets = self.sets.entry(id).or_default();
        let len = sets.len();
        sets.get_mut(set).ok_or(SessionError::SetOutOfRange {
            exercise: name,
            index: set,
            len,
        })
    }

    /// Record weight (and optionally reps) on a set and tick it off
    pub fn log_set(
        &mut self,
        exercise: usize,
        set: usize,
        weight: impl Into<String>,
        reps: Option<String>,
    ) -> Result<(), SessionError> {
        let entry = self.set_mut(exercise, set)?;
        entry.weight = weight.into();
        if reps.is_some() {
            entry.reps = reps;
        }
        entry.checked = true;
        Ok(())
    }

    /// Flip the checked flag of a set. Returns the new state.
    pub fn toggle_set(&mut self, exercise: usize, set: usize) -> Result<bool, SessionError> {
        let entry = self.set_mut(exercise, set)?;
        entry.checked = !entry.checked;
        Ok(entry.checked)
    }

    /// Add one set to an exercise, bumping the count in its `sets` text.
    /// Returns the new number of sets.
    pub fn add_set(&mut self, exercise: usize) -> Result<usize, SessionError> {
        let len = self.plan.exercises.len();
        let ex = self
            .plan
            .exercises
            .get_mut(exercise)
            .ok_or(SessionError::ExerciseOutOfRange { index: exercise, len })?;

        if let Some(bumped) = bump_numeric_prefix(&ex.sets) {
            ex.sets = bumped;
        }

        let sets = self.sets.entry(ex.id.clone()).or_default();
        sets.push(CompletedSet::blank());
        Ok(sets.len())
    }

    /// Swap in a replacement exercise; its sets start blank
    pub fn replace_exercise(
        &mut self,
        index: usize,
        mut replacement: Exercise,
        default_set_count: u32,
    ) -> Result<(), SessionError> {
        let old_id = self.exercise(index)?.id.clone();

        let taken = self
            .plan
            .exercises
            .iter()
            .enumerate()
            .any(|(i, ex)| i != index && ex.id == replacement.id);
        if replacement.id.is_empty() || taken {
            replacement.id = Uuid::new_v4().to_string();
        }
        replacement.completed_sets = None;

        self.sets.remove(&old_id);
        self.sets
            .insert(replacement.id.clone(), blank_sets(&replacement, default_set_count));
        tracing::debug!(
            "Replaced '{}' with '{}'",
            self.plan.exercises[index].name,
            replacement.name
        );
        self.plan.exercises[index] = replacement;
        Ok(())
    }

    /// Move to the next exercise. Returns false when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.current_index + 1 < self.plan.exercises.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous exercise. Returns false when already on the first one.
    pub fn back(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Most recent logged sets of the current exercise in `history`
    pub fn last_performance<'a>(&self, history: &'a [HistoricalWorkout]) -> Option<&'a [CompletedSet]> {
        let exercise = self.current_exercise()?;
        find_last_performance(&exercise.name, history)
    }

    /// Close the session. A plan duration of 0 becomes `default_duration`.
    pub fn finish(self, now: DateTime<Utc>, default_duration: u32) -> HistoricalWorkout {
        let Self { mut plan, mut sets, .. } = self;

        for exercise in &mut plan.exercises {
            exercise.completed_sets = Some(sets.remove(&exercise.id).unwrap_or_default());
        }
        if plan.duration == 0 {
            plan.duration = default_duration;
        }

        HistoricalWorkout::new(plan, now)
    }
}

fn blank_sets(exercise: &Exercise, default_set_count: u32) -> Vec<CompletedSet> {
    let count = exercise
        .planned_set_count(default_set_count)
        .min(MAX_PLANNED_SETS) as usize;
    vec![CompletedSet::blank(); count]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(id: &str, name: &str, sets: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            sets: sets.to_string(),
            reps: "10".to_string(),
            ..Default::default()
        }
    }

    fn plan(exercises: Vec<Exercise>) -> WorkoutPlan {
        WorkoutPlan {
            title: "Pernas A".to_string(),
            duration: 0,
            focus: "Pernas".to_string(),
            exercises,
        }
    }

    fn session() -> ActiveSession {
        ActiveSession::start(
            plan(vec![
                exercise("a", "Agachamento Livre", "4 séries"),
                exercise("b", "Leg Press", "até a falha"),
            ]),
            Utc::now(),
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_start_creates_blank_sets() {
        let s = session();
        assert_eq!(s.sets_for(0).unwrap().len(), 4);
        assert_eq!(s.sets_for(1).unwrap().len(), 3);
        assert!(s.sets_for(0).unwrap().iter().all(|set| !set.checked));
    }

    #[test]
    fn test_start_rejects_empty_plan() {
        assert_eq!(
            ActiveSession::start(plan(vec![]), Utc::now(), 3).unwrap_err(),
            SessionError::EmptyPlan
        );
    }

    #[test]
    fn test_duplicate_ids_are_replaced() {
        let s = ActiveSession::start(
            plan(vec![exercise("x", "A", "2"), exercise("x", "B", "2"), exercise("", "C", "2")]),
            Utc::now(),
            3,
        )
        .unwrap();
        let ids: HashSet<&str> = s.plan.exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(s.sets.len(), 3);
    }

    #[test]
    fn test_log_and_toggle() {
        let mut s = session();
        s.log_set(0, 1, "100", Some("8".to_string())).unwrap();
        let set = &s.sets_for(0).unwrap()[1];
        assert!(set.checked);
        assert_eq!(set.weight, "100");
        assert_eq!(set.reps.as_deref(), Some("8"));

        assert!(!s.toggle_set(0, 1).unwrap());
        assert!(matches!(
            s.log_set(0, 9, "1", None),
            Err(SessionError::SetOutOfRange { index: 9, len: 4, .. })
        ));
        assert!(matches!(
            s.toggle_set(5, 0),
            Err(SessionError::ExerciseOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_add_set_bumps_text() {
        let mut s = session();
        assert_eq!(s.add_set(0).unwrap(), 5);
        assert_eq!(s.plan.exercises[0].sets, "5 séries");

        // no number to bump, but the set is still added
        assert_eq!(s.add_set(1).unwrap(), 4);
        assert_eq!(s.plan.exercises[1].sets, "até a falha");
    }

    #[test]
    fn test_huge_set_count_is_capped() {
        let mut session = ActiveSession::start(
            plan(vec![exercise("a", "Agachamento Livre", "4000000000 séries")]),
            Utc::now(),
            3,
        )
        .unwrap();
        assert_eq!(session.sets_for(0).unwrap().len(), MAX_PLANNED_SETS as usize);

        session
            .replace_exercise(0, exercise("b", "Leg Press", "99999"), 3)
            .unwrap();
        assert_eq!(session.sets_for(0).unwrap().len(), MAX_PLANNED_SETS as usize);
    }

    #[test]
    fn test_replace_exercise_resets_sets() {
        let mut s = session();
        s.log_set(0, 0, "80", None).unwrap();
        s.replace_exercise(0, exercise("b", "Hack Squat", "2"), 3).unwrap();

        let replaced = &s.plan.exercises[0];
        assert_eq!(replaced.name, "Hack Squat");
        assert_ne!(replaced.id, "b");
        assert_eq!(s.sets_for(0).unwrap().len(), 2);
        assert!(s.sets_for(0).unwrap().iter().all(|set| set.weight.is_empty()));
        assert_eq!(s.sets.len(), 2);
    }

    #[test]
    fn test_navigation() {
        let mut s = session();
        assert!(!s.back());
        assert!(s.advance());
        assert_eq!(s.current_exercise().unwrap().name, "Leg Press");
        assert!(!s.advance());
        assert!(s.back());
    }

    #[test]
    fn test_finish_attaches_sets_and_default_duration() {
        let mut s = session();
        s.log_set(0, 0, "100", None).unwrap();
        let workout = s.finish(Utc::now(), 45);

        assert_eq!(workout.plan.duration, 45);
        let first = workout.plan.exercises[0].completed_sets.as_ref().unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].weight, "100");
        assert!(workout.plan.exercises[1].completed_sets.is_some());
    }

    #[test]
    fn test_session_roundtrips_as_json() {
        let s = session();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"currentIndex\""));
        let back: ActiveSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
