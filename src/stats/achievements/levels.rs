//! XP and Level system
//!
//! Each level needs more XP than the last: the threshold to leave level `n`
//! is `base_level_xp * level_growth_rate^(n-1)`, rounded.

use serde::{Deserialize, Serialize};

use crate::domain::UserProfile;

/// XP rewards and level curve (the `[gamification]` config section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamificationRules {
    /// XP for every completed workout
    pub base_workout_xp: u32,
    /// Extra XP per exercise flagged as a new PR
    pub pr_xp_bonus: u32,
    /// XP needed to leave level 1
    pub base_level_xp: u32,
    pub level_growth_rate: f64,
}

impl Default for GamificationRules {
    fn default() -> Self {
        Self {
            base_workout_xp: 50,
            pr_xp_bonus: 25,
            base_level_xp: 200,
            level_growth_rate: 1.2,
        }
    }
}

impl GamificationRules {
    /// XP awarded for one completion with `new_prs` PR exercises
    pub fn earned_xp(&self, new_prs: usize) -> u32 {
        let bonus = self.pr_xp_bonus.saturating_mul(new_prs.min(u32::MAX as usize) as u32);
        self.base_workout_xp.saturating_add(bonus)
    }

    /// XP needed to go from `level` to `level + 1`. Never below 1.
    pub fn xp_for_level(&self, level: u32) -> u32 {
        let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
        let xp = (f64::from(self.base_level_xp) * self.level_growth_rate.powi(exponent)).round();
        if xp.is_finite() {
            xp.clamp(1.0, f64::from(u32::MAX)) as u32
        } else {
            u32::MAX
        }
    }
}

/// Add `earned` XP to `profile`, levelling up as often as the XP allows.
/// Returns true when at least one level was gained.
pub fn apply_xp(profile: &mut UserProfile, earned: u32, rules: &GamificationRules) -> bool {
    let start_level = profile.level;
    profile.xp = profile.xp.saturating_add(earned);

    // A stored threshold of 0 would never let the loop end
    profile.xp_to_next_level = profile.xp_to_next_level.max(1);

    while profile.xp >= profile.xp_to_next_level {
        profile.xp -= profile.xp_to_next_level;
        profile.level = profile.level.saturating_add(1);
        profile.xp_to_next_level = rules.xp_for_level(profile.level);
    }

    let levelled = profile.level > start_level;
    if levelled {
        tracing::info!(
            "Level up: {} -> {} ({} / {} xp)",
            start_level,
            profile.level,
            profile.xp,
            profile.xp_to_next_level
        );
    }
    levelled
}
