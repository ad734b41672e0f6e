//! Gamification: XP, levels and achievements
//!
//! Achievements are declarative: each one carries a [`Condition`] that is
//! evaluated against the current history, stats and records.

mod checker;
mod definitions;
mod levels;
mod manager;

pub use checker::{
    achievement_board, is_met, newly_unlocked, unlocked, AchievementContext, AchievementStatus,
    BoardFilter,
};
pub use definitions::{Achievement, AchievementId, Condition, Stat, ACHIEVEMENTS};
pub use levels::{apply_xp, GamificationRules};
pub use manager::{process_completion, CompletionInput, GamificationResult};
