//! Per-exercise max-weight time series

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::ExerciseMetrics;
use crate::domain::HistoricalWorkout;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDataPoint {
    pub date: DateTime<Utc>,
    pub max_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    pub name: String,
    /// Oldest first
    pub data: Vec<ExerciseDataPoint>,
    pub initial_weight: f64,
    pub current_weight: f64,
    /// `current_weight - initial_weight`
    pub evolution: f64,
    pub workout_count: usize,
}

/// Build one series per exercise name, biggest improvement first.
///
/// Every occurrence counts, including ones without any logged weight.
pub fn build_progress(history: &[HistoricalWorkout]) -> Vec<ExerciseProgress> {
    let mut chronological: Vec<&HistoricalWorkout> = history.iter().collect();
    chronological.sort_by_key(|w| w.completed_at);

    // Names in order of first appearance keep ties deterministic
    let mut order: Vec<&str> = Vec::new();
    let mut series: HashMap<&str, Vec<ExerciseDataPoint>> = HashMap::new();

    for workout in chronological {
        for exercise in &workout.plan.exercises {
            let points = series.entry(exercise.name.as_str()).or_insert_with(|| {
                order.push(exercise.name.as_str());
                Vec::new()
            });
            points.push(ExerciseDataPoint {
                date: workout.completed_at,
                max_weight: ExerciseMetrics::of(exercise).max_weight,
            });
        }
    }

    let mut progress: Vec<ExerciseProgress> = order
        .into_iter()
        .filter_map(|name| {
            let data = series.remove(name)?;
            let initial_weight = data.first()?.max_weight;
            let current_weight = data.last()?.max_weight;
            Some(ExerciseProgress {
                name: name.to_string(),
                initial_weight,
                current_weight,
                evolution: current_weight - initial_weight,
                workout_count: data.len(),
                data,
            })
        })
        .collect();

    progress.sort_by(|a, b| b.evolution.total_cmp(&a.evolution));
    progress
}
