//! Achievement checking logic
//!
//! Every condition is a pure function of history, stats and records, so the
//! same state always gives the same unlock set.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::definitions::{Achievement, Condition, ACHIEVEMENTS};
use crate::domain::{HistoricalWorkout, PersonalRecords, UserStats};

/// The state achievements are evaluated against
#[derive(Debug, Clone, Copy)]
pub struct AchievementContext<'a> {
    pub history: &'a [HistoricalWorkout],
    pub stats: &'a UserStats,
    pub records: &'a PersonalRecords,
}

impl<'a> AchievementContext<'a> {
    pub fn new(
        history: &'a [HistoricalWorkout],
        stats: &'a UserStats,
        records: &'a PersonalRecords,
    ) -> Self {
        Self {
            history,
            stats,
            records,
        }
    }
}

/// Check a single condition
pub fn is_met(condition: &Condition, ctx: &AchievementContext<'_>) -> bool {
    match condition {
        Condition::WorkoutCount { at_least } => ctx.history.len() >= *at_least,
        Condition::StatThreshold { stat, at_least } => stat.value(ctx.stats) >= *at_least,
        Condition::NamedRecord {
            exercises,
            at_least,
        } => ctx.records.best_of(exercises) >= *at_least,
        Condition::FocusCount { keywords, at_least } => {
            let matching = ctx
                .history
                .iter()
                .filter(|w| {
                    let focus = w.plan.focus.to_lowercase();
                    keywords.iter().any(|k| focus.contains(*k))
                })
                .count();
            matching >= *at_least
        }
    }
}

/// All achievements unlocked in `ctx`, in registry order
pub fn unlocked(ctx: &AchievementContext<'_>) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| is_met(&a.condition, ctx))
        .collect()
}

/// Achievements locked in `before` and unlocked in `after`
pub fn newly_unlocked(
    before: &AchievementContext<'_>,
    after: &AchievementContext<'_>,
) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !is_met(&a.condition, before) && is_met(&a.condition, after))
        .collect()
}

/// Which achievements a board lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardFilter {
    #[default]
    All,
    Unlocked,
    Locked,
}

impl FromStr for BoardFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "unlocked" => Ok(Self::Unlocked),
            "locked" => Ok(Self::Locked),
            other => Err(format!("unknown filter '{}' (expected all, unlocked or locked)", other)),
        }
    }
}

impl fmt::Display for BoardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::Unlocked => "unlocked",
            Self::Locked => "locked",
        };
        write!(f, "{}", s)
    }
}

/// An achievement with its current unlock state
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub achievement: &'static Achievement,
    pub unlocked: bool,
}

/// Every achievement matching `filter`, unlocked ones first.
///
/// Order inside each group follows the registry.
pub fn achievement_board(ctx: &AchievementContext<'_>, filter: BoardFilter) -> Vec<AchievementStatus> {
    let mut board: Vec<AchievementStatus> = ACHIEVEMENTS
        .iter()
        .map(|achievement| AchievementStatus {
            achievement,
            unlocked: is_met(&achievement.condition, ctx),
        })
        .filter(|status| match filter {
            BoardFilter::All => true,
            BoardFilter::Unlocked => status.unlocked,
            BoardFilter::Locked => !status.unlocked,
        })
        .collect();

    // stable: keeps registry order within each group
    board.sort_by_key(|status| !status.unlocked);
    board
}
