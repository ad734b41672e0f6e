//! Aggregate user statistics over the full history

use chrono::{Local, NaiveDate};

use super::metrics::ExerciseMetrics;
use super::streaks::current_streak;
use crate::domain::{HistoricalWorkout, UserStats};

/// Statistics for `history`, with the streak evaluated on the local current date
pub fn compute_stats(history: &[HistoricalWorkout]) -> UserStats {
    compute_stats_on(history, Local::now().date_naive())
}

/// Statistics for `history`, with the streak evaluated on `today`
pub fn compute_stats_on(history: &[HistoricalWorkout], today: NaiveDate) -> UserStats {
    if history.is_empty() {
        return UserStats::default();
    }

    let time_spent = history.iter().map(|w| u64::from(w.plan.duration)).sum();
    let total_volume: f64 = history.iter().map(workout_volume).sum();
    let streak = current_streak(history.iter().map(HistoricalWorkout::local_day), today);

    UserStats {
        total_workouts: history.len() as u32,
        current_streak: streak,
        total_volume: round_volume(total_volume),
        time_spent,
    }
}

/// Unrounded volume of one workout
pub fn workout_volume(workout: &HistoricalWorkout) -> f64 {
    workout
        .plan
        .exercises
        .iter()
        .map(|ex| ExerciseMetrics::of(ex).volume)
        .sum()
}

/// Round a volume to whole kilograms (negative totals clamp to 0)
pub fn round_volume(volume: f64) -> u64 {
    volume.round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletedSet, Exercise, WorkoutPlan};
    use chrono::{Duration, TimeZone, Utc};

    fn workout_on(day: NaiveDate, duration: u32, weight: &str, reps: &str) -> HistoricalWorkout {
        let local = Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap();
        HistoricalWorkout::new(
            WorkoutPlan {
                title: "Treino".to_string(),
                duration,
                focus: "Peito".to_string(),
                exercises: vec![Exercise {
                    id: "1".to_string(),
                    name: "Supino Reto".to_string(),
                    sets: "1".to_string(),
                    reps: "10".to_string(),
                    description: String::new(),
                    completed_sets: Some(vec![CompletedSet::logged(weight, Some(reps.to_string()))]),
                }],
            },
            local.with_timezone(&Utc),
        )
    }

    #[test]
    fn test_empty_history() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(compute_stats_on(&[], today), UserStats::default());
    }

    #[test]
    fn test_totals_and_streak() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        // newest first
        let history = vec![
            workout_on(today, 45, "50", "10"),
            workout_on(today - Duration::days(1), 30, "22,5", "9"),
            workout_on(today - Duration::days(2), 60, "", "10"),
        ];
        let stats = compute_stats_on(&history, today);
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.time_spent, 135);
        assert_eq!(stats.total_volume, 500 + 203); // 202.5 rounds up
        assert_eq!(stats.current_streak, 3);
    }

    #[test]
    fn test_stale_history_has_no_streak() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let history = vec![workout_on(today - Duration::days(3), 45, "50", "10")];
        assert_eq!(compute_stats_on(&history, today).current_streak, 0);
    }
}
