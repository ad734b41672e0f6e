//! Numeric parsing of free-text set fields and per-exercise metrics
//!
//! User input is untrusted: anything that does not parse counts as zero and
//! never produces an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{CompletedSet, Exercise};

static FIRST_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit regex"));

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float regex")
});

static UINT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d+").expect("valid int regex"));

/// First run of digits anywhere in `text`, or 0.
///
/// "4 séries" -> 4, "8-12" -> 8, "30s" -> 30.
pub fn parse_numeric_prefix(text: &str) -> u32 {
    FIRST_DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Increment the first run of digits in `text`, keeping the rest.
///
/// "3 séries" -> "4 séries". `None` when `text` has no digits.
pub fn bump_numeric_prefix(text: &str) -> Option<String> {
    let m = FIRST_DIGITS.find(text)?;
    let next = m.as_str().parse::<u32>().unwrap_or(u32::MAX).saturating_add(1);
    Some(format!("{}{}{}", &text[..m.start()], next, &text[m.end()..]))
}

/// Parse a weight, accepting a comma as decimal separator.
///
/// Only the leading numeric part is read ("80kg" -> 80). Empty or invalid
/// text gives 0.
pub fn parse_weight(text: &str) -> f64 {
    let normalized = text.replacen(',', ".", 1);
    FLOAT_PREFIX
        .find(normalized.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}

/// Reps logged on a set, when they parse to a positive integer
fn parse_set_reps(text: &str) -> Option<u32> {
    UINT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().trim_start_matches('+').parse::<u32>().ok())
        .filter(|reps| *reps > 0)
}

/// A set after parsing its text fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedSet {
    pub weight: f64,
    pub reps: Option<u32>,
}

impl From<&CompletedSet> for ParsedSet {
    fn from(set: &CompletedSet) -> Self {
        Self {
            weight: parse_weight(&set.weight),
            reps: set.reps.as_deref().and_then(parse_set_reps),
        }
    }
}

/// Max weight and volume of one exercise occurrence.
///
/// Every set is parsed exactly once here; other components work on these
/// numbers instead of re-reading the text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExerciseMetrics {
    pub max_weight: f64,
    pub volume: f64,
}

impl ExerciseMetrics {
    pub fn of(exercise: &Exercise) -> Self {
        Self::from_sets(exercise.logged_sets(), &exercise.reps)
    }

    /// `planned_reps` is the plan's nominal reps text, used when a set has no
    /// reps of its own.
    pub fn from_sets(sets: &[CompletedSet], planned_reps: &str) -> Self {
        let fallback_reps = parse_numeric_prefix(planned_reps);
        let mut metrics = Self::default();

        for parsed in sets.iter().map(ParsedSet::from) {
            metrics.max_weight = metrics.max_weight.max(parsed.weight);

            // Only sets with a logged weight count toward volume
            if parsed.weight == 0.0 {
                continue;
            }
            let reps = parsed.reps.unwrap_or(fallback_reps);
            metrics.volume += parsed.weight * f64::from(reps);
        }

        metrics
    }
}

/// Sum of weight x reps over the logged sets of `exercise`
pub fn exercise_volume(exercise: &Exercise) -> f64 {
    ExerciseMetrics::of(exercise).volume
}

/// Heaviest logged weight of `exercise`, 0 when nothing was logged
pub fn exercise_max_weight(exercise: &Exercise) -> f64 {
    ExerciseMetrics::of(exercise).max_weight
}
