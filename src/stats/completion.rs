//! The state transition for one completed workout

use chrono::NaiveDate;
use serde::Serialize;

use super::achievements::{process_completion, CompletionInput, GamificationResult, GamificationRules};
use super::aggregate::compute_stats_on;
use super::summary::{build_summary, WorkoutSummary};
use crate::domain::{HistoricalWorkout, PersonalRecords, UserProfile};
use crate::store::history::prepend;

/// Everything a completion reads and rewrites
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    /// Newest first
    pub history: Vec<HistoricalWorkout>,
    pub profile: UserProfile,
    pub records: PersonalRecords,
}

/// What a completion reports back
#[derive(Debug, Clone, Serialize)]
pub struct CompletionOutcome {
    pub summary: WorkoutSummary,
    pub gamification: GamificationResult,
}

/// Record `workout` against `state`.
///
/// Returns the next state (workout prepended, profile and records updated)
/// plus the summary and gamification result. Streaks are evaluated on `today`.
pub fn complete_workout(
    state: TrackerState,
    workout: HistoricalWorkout,
    rules: &GamificationRules,
    today: NaiveDate,
) -> (TrackerState, CompletionOutcome) {
    let TrackerState {
        mut history,
        profile,
        records,
    } = state;

    prepend(&mut history, workout);
    let completed = &history[0];

    let stats = compute_stats_on(&history, today);
    let summary = build_summary(completed, &history);
    let gamification = process_completion(CompletionInput {
        summary: &summary,
        profile: &profile,
        history: &history,
        records: &records,
        stats: &stats,
        rules,
        today,
    });

    tracing::info!(
        "Completed '{}': +{} xp, {} new PRs, {} achievements",
        summary.title,
        gamification.earned_xp,
        summary.new_pr_count(),
        gamification.unlocked_achievements.len()
    );

    let next = TrackerState {
        history,
        profile: gamification.updated_profile.clone(),
        records: gamification.new_prs.clone(),
    };
    (
        next,
        CompletionOutcome {
            summary,
            gamification,
        },
    )
}
