//! Queries over the history log (newest first)

use crate::domain::{CompletedSet, HistoricalWorkout};

/// Logged sets of the most recent occurrence of `name` in `window`.
///
/// Occurrences without any logged set are skipped. Matching is by exact
/// exercise name.
pub fn find_last_performance<'a>(
    name: &str,
    window: &'a [HistoricalWorkout],
) -> Option<&'a [CompletedSet]> {
    window.iter().find_map(|workout| {
        workout
            .plan
            .exercises
            .iter()
            .find(|ex| ex.name == name && ex.has_logged_sets())
            .map(|ex| ex.logged_sets())
    })
}

/// Put `workout` at the front of `history`
pub fn prepend(history: &mut Vec<HistoricalWorkout>, workout: HistoricalWorkout) {
    history.insert(0, workout);
}

/// History as it was before the newest entry was added
pub fn prior_window(history: &[HistoricalWorkout]) -> &[HistoricalWorkout] {
    history.get(1..).unwrap_or(&[])
}
