//! Post-workout summary: compares each exercise with its last performance

use serde::{Deserialize, Serialize};

use super::aggregate::round_volume;
use super::metrics::ExerciseMetrics;
use crate::domain::HistoricalWorkout;
use crate::store::history::{find_last_performance, prior_window};

/// Performance of one exercise in one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePerformance {
    pub max_weight: f64,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseComparison {
    pub name: String,
    pub current: ExercisePerformance,
    /// Last prior performance; its volume is not computed and stays 0
    pub last: Option<ExercisePerformance>,
    #[serde(rename = "isNewPR")]
    pub is_new_pr: bool,
}

impl ExerciseComparison {
    /// Change in max weight against the last performance
    pub fn weight_delta(&self) -> Option<f64> {
        self.last.map(|last| self.current.max_weight - last.max_weight)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub title: String,
    pub duration: u32,
    /// Rounded sum of the per-exercise volumes
    pub total_volume: u64,
    pub exercises: Vec<ExerciseComparison>,
}

impl WorkoutSummary {
    pub fn new_pr_count(&self) -> usize {
        self.exercises.iter().filter(|ex| ex.is_new_pr).count()
    }
}

/// Build the summary for `completed`, which must already sit at index 0 of
/// `history`. Comparisons only look at `history[1..]`.
pub fn build_summary(completed: &HistoricalWorkout, history: &[HistoricalWorkout]) -> WorkoutSummary {
    let prior = prior_window(history);
    let mut total_volume = 0.0;

    let exercises = completed
        .plan
        .exercises
        .iter()
        .map(|exercise| {
            let metrics = ExerciseMetrics::of(exercise);
            total_volume += metrics.volume;

            let current = ExercisePerformance {
                max_weight: metrics.max_weight,
                total_volume: metrics.volume,
            };
            let last = find_last_performance(&exercise.name, prior).map(|sets| ExercisePerformance {
                max_weight: ExerciseMetrics::from_sets(sets, "").max_weight,
                total_volume: 0.0,
            });
            let is_new_pr = match last {
                None => current.max_weight > 0.0,
                Some(last) => current.max_weight > last.max_weight,
            };

            ExerciseComparison {
                name: exercise.name.clone(),
                current,
                last,
                is_new_pr,
            }
        })
        .collect();

    let summary = WorkoutSummary {
        title: completed.plan.title.clone(),
        duration: completed.plan.duration,
        total_volume: round_volume(total_volume),
        exercises,
    };
    tracing::debug!(
        "Summary for '{}': volume {} kg, {} new PRs",
        summary.title,
        summary.total_volume,
        summary.new_pr_count()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletedSet, Exercise, WorkoutPlan};
    use chrono::{Duration, Utc};

    fn workout(days_ago: i64, entries: &[(&str, &[&str])]) -> HistoricalWorkout {
        HistoricalWorkout::new(
            WorkoutPlan {
                title: "Treino".to_string(),
                duration: 45,
                focus: "Peito".to_string(),
                exercises: entries
                    .iter()
                    .map(|(name, weights)| Exercise {
                        id: name.to_string(),
                        name: name.to_string(),
                        sets: weights.len().to_string(),
                        reps: "10".to_string(),
                        description: String::new(),
                        completed_sets: Some(
                            weights.iter().map(|w| CompletedSet::logged(*w, None)).collect(),
                        ),
                    })
                    .collect(),
            },
            Utc::now() - Duration::days(days_ago),
        )
    }

    #[test]
    fn test_heavier_than_last_is_pr() {
        let new = workout(0, &[("Supino Reto", &["55", "60"])]);
        let history = vec![new.clone(), workout(2, &[("Supino Reto", &["50"])])];
        let summary = build_summary(&new, &history);

        let cmp = &summary.exercises[0];
        assert!(cmp.is_new_pr);
        assert_eq!(cmp.last.unwrap().max_weight, 50.0);
        assert_eq!(cmp.weight_delta(), Some(10.0));
        assert_eq!(summary.total_volume, 1150);
    }

    #[test]
    fn test_equal_weight_is_not_pr() {
        let new = workout(0, &[("Supino Reto", &["60"])]);
        let history = vec![new.clone(), workout(2, &[("Supino Reto", &["60"])])];
        assert!(!build_summary(&new, &history).exercises[0].is_new_pr);
    }

    #[test]
    fn test_first_occurrence_needs_weight() {
        let new = workout(0, &[("Supino Reto", &["40"]), ("Prancha", &[""])]);
        let history = vec![new.clone()];
        let summary = build_summary(&new, &history);
        assert!(summary.exercises[0].is_new_pr);
        assert!(summary.exercises[0].last.is_none());
        assert!(!summary.exercises[1].is_new_pr);
    }

    #[test]
    fn test_comparison_excludes_current_entry() {
        // Without excluding index 0 the workout would compare against itself
        let new = workout(0, &[("Agachamento Livre", &["100"])]);
        let history = vec![new.clone()];
        assert!(build_summary(&new, &history).exercises[0].last.is_none());
    }

    #[test]
    fn test_skips_workouts_without_logged_sets() {
        let new = workout(0, &[("Remada Curvada", &["70"])]);
        let mut empty = workout(1, &[("Remada Curvada", &[])]);
        empty.plan.exercises[0].completed_sets = None;
        let history = vec![new.clone(), empty, workout(5, &[("Remada Curvada", &["75"])])];

        let cmp = &build_summary(&new, &history).exercises[0];
        assert_eq!(cmp.last.unwrap().max_weight, 75.0);
        assert!(!cmp.is_new_pr);
    }
}
