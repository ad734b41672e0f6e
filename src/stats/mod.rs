//! Progress tracking and gamification for ironlog
//!
//! Pure computations over the workout history, plus the [`Tracker`] facade
//! that runs them against a persistent store.
//!
//! # Architecture
//!
//! ```text
//! completed workout
//!        │
//!        ▼
//!   history (prepend) ──► stats ──► summary ──► gamification
//!                                               (xp, records, achievements)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let tracker = Tracker::new(SqliteStore::open_default()?, config.gamification.clone());
//!
//! // Record a finished session
//! let outcome = tracker.append_workout(session.finish(Utc::now(), 45))?;
//!
//! // Query for display
//! let progress = tracker.progress()?;
//! ```

pub mod achievements;
mod aggregate;
mod completion;
pub mod metrics;
mod progress;
mod streaks;
mod summary;

pub use aggregate::{compute_stats, compute_stats_on, round_volume, workout_volume};
pub use completion::{complete_workout, CompletionOutcome, TrackerState};
pub use metrics::{exercise_max_weight, exercise_volume, parse_weight, ExerciseMetrics};
pub use progress::{build_progress, ExerciseDataPoint, ExerciseProgress};
pub use streaks::current_streak;
pub use summary::{build_summary, ExerciseComparison, ExercisePerformance, WorkoutSummary};

use chrono::{Local, NaiveDate};

use crate::domain::{HistoricalWorkout, PersonalRecords, UserProfile, UserStats};
use crate::store::{KeyValueStore, Repository, StoreError};
use achievements::{achievement_board, AchievementContext, AchievementStatus, BoardFilter, GamificationRules};

/// Central manager for progress tracking
///
/// Loads the persisted state, runs the pure engine and writes the results
/// back as whole values.
pub struct Tracker<S> {
    repo: Repository<S>,
    rules: GamificationRules,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(store: S, rules: GamificationRules) -> Self {
        Self {
            repo: Repository::new(store),
            rules,
        }
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub fn rules(&self) -> &GamificationRules {
        &self.rules
    }

    /// Record a completed workout, evaluating streaks on the local date
    pub fn append_workout(&self, workout: HistoricalWorkout) -> Result<CompletionOutcome, StoreError> {
        self.append_workout_on(workout, Local::now().date_naive())
    }

    /// Record a completed workout, evaluating streaks on `today`
    pub fn append_workout_on(
        &self,
        workout: HistoricalWorkout,
        today: NaiveDate,
    ) -> Result<CompletionOutcome, StoreError> {
        let state = TrackerState {
            history: self.repo.history()?,
            profile: self.repo.profile()?,
            records: self.repo.records()?,
        };

        let (next, outcome) = complete_workout(state, workout, &self.rules, today);

        self.repo
            .save_completion(&next.history, &next.profile, &next.records)?;
        Ok(outcome)
    }

    pub fn history(&self) -> Result<Vec<HistoricalWorkout>, StoreError> {
        self.repo.history()
    }

    pub fn stats(&self) -> Result<UserStats, StoreError> {
        Ok(compute_stats(&self.repo.history()?))
    }

    pub fn progress(&self) -> Result<Vec<ExerciseProgress>, StoreError> {
        Ok(build_progress(&self.repo.history()?))
    }

    pub fn profile(&self) -> Result<UserProfile, StoreError> {
        self.repo.profile()
    }

    pub fn records(&self) -> Result<PersonalRecords, StoreError> {
        self.repo.records()
    }

    /// Every achievement with its unlock state under the stored data
    pub fn achievements(&self, filter: BoardFilter) -> Result<Vec<AchievementStatus>, StoreError> {
        let history = self.repo.history()?;
        let stats = compute_stats(&history);
        let records = self.repo.records()?;
        let ctx = AchievementContext::new(&history, &stats, &records);
        Ok(achievement_board(&ctx, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkoutPlan;
    use crate::store::MemoryStore;
    use chrono::Utc;

    #[test]
    fn test_tracker_roundtrip() {
        let tracker = Tracker::new(MemoryStore::new(), GamificationRules::default());
        let workout = HistoricalWorkout::new(
            WorkoutPlan {
                title: "Corpo Inteiro A".to_string(),
                duration: 50,
                focus: "Corpo Inteiro".to_string(),
                exercises: vec![],
            },
            Utc::now(),
        );

        let outcome = tracker.append_workout(workout).unwrap();
        assert_eq!(outcome.gamification.earned_xp, 50);
        assert_eq!(outcome.gamification.unlocked_achievements.len(), 2);

        assert_eq!(tracker.history().unwrap().len(), 1);
        assert_eq!(tracker.profile().unwrap().xp, 50);
        assert_eq!(tracker.stats().unwrap().time_spent, 50);
        assert_eq!(tracker.achievements(BoardFilter::Unlocked).unwrap().len(), 2);
    }
}
