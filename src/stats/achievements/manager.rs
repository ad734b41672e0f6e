//! Gamification for one completed workout
//!
//! Awards XP, raises personal records, levels the profile up and reports the
//! achievements this completion unlocked.

use chrono::NaiveDate;
use serde::Serialize;

use super::checker::{newly_unlocked, AchievementContext};
use super::definitions::Achievement;
use super::levels::{apply_xp, GamificationRules};
use crate::domain::{HistoricalWorkout, PersonalRecords, UserProfile, UserStats};
use crate::stats::aggregate::compute_stats_on;
use crate::stats::summary::WorkoutSummary;
use crate::store::history::prior_window;

/// Everything the engine reads for one completion
#[derive(Debug, Clone, Copy)]
pub struct CompletionInput<'a> {
    pub summary: &'a WorkoutSummary,
    pub profile: &'a UserProfile,
    /// Full history, the completed workout at index 0
    pub history: &'a [HistoricalWorkout],
    /// Stored records before this workout; the new map is raised from these
    pub records: &'a PersonalRecords,
    /// Stats over `history`
    pub stats: &'a UserStats,
    pub rules: &'a GamificationRules,
    /// Date streaks are evaluated on
    pub today: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationResult {
    pub updated_profile: UserProfile,
    /// The full record map after this workout
    #[serde(rename = "newPRs")]
    pub new_prs: PersonalRecords,
    pub unlocked_achievements: Vec<&'static Achievement>,
    pub earned_xp: u32,
    pub level_up: bool,
}

/// Apply one completion. Pure; inputs are never modified.
pub fn process_completion(input: CompletionInput<'_>) -> GamificationResult {
    let rules = input.rules;
    let earned_xp = rules.earned_xp(input.summary.new_pr_count());

    let mut new_prs = input.records.clone();
    for exercise in &input.summary.exercises {
        if new_prs.raise(&exercise.name, exercise.current.max_weight) {
            tracing::debug!(
                "New record for '{}': {} kg",
                exercise.name,
                exercise.current.max_weight
            );
        }
    }

    let mut updated_profile = input.profile.clone();
    let level_up = apply_xp(&mut updated_profile, earned_xp, rules);
    updated_profile.stats = *input.stats;

    // Prior state: the same history minus exactly the newest entry, with the
    // records as stored before this workout. Both sides read the same map.
    let prior_history = prior_window(input.history);
    let prior_stats = compute_stats_on(prior_history, input.today);
    let before = AchievementContext::new(prior_history, &prior_stats, input.records);
    let after = AchievementContext::new(input.history, input.stats, &new_prs);
    let unlocked_achievements = newly_unlocked(&before, &after);

    for achievement in &unlocked_achievements {
        tracing::info!("Achievement unlocked: {} ({})", achievement.title, achievement.id.as_str());
    }

    GamificationResult {
        updated_profile,
        new_prs,
        unlocked_achievements,
        earned_xp,
        level_up,
    }
}
