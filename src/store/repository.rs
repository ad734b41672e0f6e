//! Typed access to the persisted values
//!
//! Reads never fail on bad data: a missing key gives the default value and a
//! value that no longer parses is logged and replaced by the default. Only
//! backend failures surface as [`StoreError`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::history::prepend;
use super::{KeyValueStore, StoreError};
use crate::domain::planner::apply_generated_weekly_plan;
use crate::domain::{
    AiPreferences, CustomWorkoutPlan, GeneratedWeeklyPlan, HistoricalWorkout, PersonalRecords,
    UserProfile, WeeklySchedule,
};
use crate::session::ActiveSession;

/// Storage keys
pub mod keys {
    pub const HISTORY: &str = "ironlog-history";
    pub const PROFILE: &str = "ironlog-profile";
    pub const RECORDS: &str = "ironlog-prs";
    pub const CUSTOM_WORKOUTS: &str = "ironlog-custom-workouts";
    pub const WEEKLY_SCHEDULE: &str = "ironlog-weekly-schedule";
    pub const AI_PREFERENCES: &str = "ironlog-ai-prefs";
    pub const ACTIVE_SESSION: &str = "ironlog-active-session";
}

/// Typed wrapper around a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct Repository<S> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.store.get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("Ignoring unreadable '{}': {}", key, e);
                Ok(T::default())
            }
        }
    }

    fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StoreError> {
        serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.store.set(key, &Self::encode(key, value)?)
    }

    // History

    /// Completed workouts, newest first
    pub fn history(&self) -> Result<Vec<HistoricalWorkout>, StoreError> {
        self.load(keys::HISTORY)
    }

    pub fn save_history(&self, history: &[HistoricalWorkout]) -> Result<(), StoreError> {
        self.save(keys::HISTORY, history)
    }

    /// Prepend `workout` and persist the whole log. Returns the new log.
    pub fn append_history(
        &self,
        workout: HistoricalWorkout,
    ) -> Result<Vec<HistoricalWorkout>, StoreError> {
        let mut history = self.history()?;
        prepend(&mut history, workout);
        self.save_history(&history)?;
        Ok(history)
    }

    // Profile and records

    pub fn profile(&self) -> Result<UserProfile, StoreError> {
        self.load(keys::PROFILE)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.save(keys::PROFILE, profile)
    }

    pub fn records(&self) -> Result<PersonalRecords, StoreError> {
        self.load(keys::RECORDS)
    }

    pub fn save_records(&self, records: &PersonalRecords) -> Result<(), StoreError> {
        self.save(keys::RECORDS, records)
    }

    /// Write the result of one completion as a single batch, so history never
    /// moves ahead of the profile and records.
    pub fn save_completion(
        &self,
        history: &[HistoricalWorkout],
        profile: &UserProfile,
        records: &PersonalRecords,
    ) -> Result<(), StoreError> {
        let entries = [
            (keys::HISTORY, Self::encode(keys::HISTORY, history)?),
            (keys::PROFILE, Self::encode(keys::PROFILE, profile)?),
            (keys::RECORDS, Self::encode(keys::RECORDS, records)?),
        ];
        self.store.set_many(&entries)
    }

    // Planner

    pub fn custom_plans(&self) -> Result<Vec<CustomWorkoutPlan>, StoreError> {
        self.load(keys::CUSTOM_WORKOUTS)
    }

    pub fn save_custom_plans(&self, plans: &[CustomWorkoutPlan]) -> Result<(), StoreError> {
        self.save(keys::CUSTOM_WORKOUTS, plans)
    }

    pub fn schedule(&self) -> Result<WeeklySchedule, StoreError> {
        self.load(keys::WEEKLY_SCHEDULE)
    }

    pub fn save_schedule(&self, schedule: &WeeklySchedule) -> Result<(), StoreError> {
        self.save(keys::WEEKLY_SCHEDULE, schedule)
    }

    /// Replace the stored plans and schedule with a generated week
    pub fn save_generated_weekly_plan(
        &self,
        generated: &GeneratedWeeklyPlan,
    ) -> Result<(Vec<CustomWorkoutPlan>, WeeklySchedule), StoreError> {
        let (plans, schedule) = apply_generated_weekly_plan(generated);
        let entries = [
            (keys::CUSTOM_WORKOUTS, Self::encode(keys::CUSTOM_WORKOUTS, &plans)?),
            (keys::WEEKLY_SCHEDULE, Self::encode(keys::WEEKLY_SCHEDULE, &schedule)?),
        ];
        self.store.set_many(&entries)?;
        tracing::info!(
            "Stored generated week: {} plans, {} scheduled days",
            plans.len(),
            schedule.iter().count()
        );
        Ok((plans, schedule))
    }

    // Preferences

    pub fn preferences(&self) -> Result<AiPreferences, StoreError> {
        self.load(keys::AI_PREFERENCES)
    }

    pub fn save_preferences(&self, prefs: &AiPreferences) -> Result<(), StoreError> {
        self.save(keys::AI_PREFERENCES, prefs)
    }

    // Active session

    pub fn active_session(&self) -> Result<Option<ActiveSession>, StoreError> {
        self.load(keys::ACTIVE_SESSION)
    }

    pub fn save_active_session(&self, session: &ActiveSession) -> Result<(), StoreError> {
        self.save(keys::ACTIVE_SESSION, session)
    }

    pub fn clear_active_session(&self) -> Result<(), StoreError> {
        self.store.remove(keys::ACTIVE_SESSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayOfWeek, FitnessLevel, GeneratedPlan, WorkoutPlan};
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn repo() -> Repository<MemoryStore> {
        Repository::new(MemoryStore::new())
    }

    fn workout(title: &str) -> HistoricalWorkout {
        HistoricalWorkout::new(
            WorkoutPlan {
                title: title.to_string(),
                duration: 30,
                focus: "Pernas".to_string(),
                exercises: vec![],
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_missing_values_are_defaults() {
        let repo = repo();
        assert!(repo.history().unwrap().is_empty());
        assert_eq!(repo.profile().unwrap(), UserProfile::default());
        assert!(repo.records().unwrap().is_empty());
        assert!(repo.active_session().unwrap().is_none());
        assert_eq!(repo.preferences().unwrap(), AiPreferences::default());
    }

    #[test]
    fn test_corrupt_values_are_defaults() {
        let repo = repo();
        repo.store().set(keys::HISTORY, "{not json").unwrap();
        repo.store().set(keys::PROFILE, "[1, 2]").unwrap();
        repo.store().set(keys::RECORDS, "\"oops\"").unwrap();
        assert!(repo.history().unwrap().is_empty());
        assert_eq!(repo.profile().unwrap().name, "Atleta");
        assert!(repo.records().unwrap().is_empty());
    }

    #[test]
    fn test_save_completion_writes_all_three() {
        let repo = repo();
        let mut records = PersonalRecords::new();
        records.raise("Supino Reto", 60.0);
        let profile = UserProfile {
            xp: 75,
            ..Default::default()
        };

        repo.save_completion(&[workout("A")], &profile, &records).unwrap();
        assert_eq!(repo.history().unwrap().len(), 1);
        assert_eq!(repo.profile().unwrap().xp, 75);
        assert_eq!(repo.records().unwrap().get("Supino Reto"), Some(60.0));
    }

    #[test]
    fn test_append_history_prepends() {
        let repo = repo();
        repo.append_history(workout("A")).unwrap();
        let history = repo.append_history(workout("B")).unwrap();
        assert_eq!(history[0].plan.title, "B");

        let stored = repo.history().unwrap();
        let titles: Vec<&str> = stored.iter().map(|w| w.plan.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_records_stored_as_name_map() {
        let repo = repo();
        let mut prs = PersonalRecords::new();
        prs.raise("Supino Reto", 60.0);
        repo.save_records(&prs).unwrap();
        assert_eq!(
            repo.store().get(keys::RECORDS).unwrap().as_deref(),
            Some(r#"{"Supino Reto":60.0}"#)
        );
        assert_eq!(repo.records().unwrap(), prs);
    }

    #[test]
    fn test_generated_week_replaces_planner() {
        let repo = repo();
        let mut generated = GeneratedWeeklyPlan::default();
        generated.plans.push(GeneratedPlan {
            name: "Treino A".to_string(),
            exercises: vec![],
        });
        generated.schedule.insert(DayOfWeek::Monday, "Treino A".to_string());
        generated.schedule.insert(DayOfWeek::Friday, "Treino Z".to_string());

        let (plans, schedule) = repo.save_generated_weekly_plan(&generated).unwrap();
        assert_eq!(repo.custom_plans().unwrap(), plans);
        assert_eq!(repo.schedule().unwrap(), schedule);
        assert_eq!(schedule.plan_id_for(DayOfWeek::Monday), Some(plans[0].id.as_str()));
        assert_eq!(schedule.plan_id_for(DayOfWeek::Friday), None);
    }

    #[test]
    fn test_preferences_roundtrip() {
        let repo = repo();
        let prefs = AiPreferences {
            level: Some(FitnessLevel::Intermediate),
            equipment: vec!["Halteres".to_string()],
            ..Default::default()
        };
        repo.save_preferences(&prefs).unwrap();
        assert_eq!(repo.preferences().unwrap(), prefs);
    }
}
