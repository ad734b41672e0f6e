use serde::{Deserialize, Deserializer, Serialize};

use crate::stats::metrics::parse_numeric_prefix;

/// A single set as the user logged it.
///
/// Weight and reps stay free text here; they are parsed once by
/// [`ExerciseMetrics`](crate::stats::ExerciseMetrics) when numbers are needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletedSet {
    /// Whether the user ticked the set off
    #[serde(default)]
    pub checked: bool,
    /// Weight text, e.g. "80", "22,5" or ""
    #[serde(default, deserialize_with = "text_or_number")]
    pub weight: String,
    /// Reps text; falls back to the plan's nominal reps when empty
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_text_or_number")]
    pub reps: Option<String>,
}

impl CompletedSet {
    /// Blank set, as created when a session starts
    pub fn blank() -> Self {
        Self {
            checked: false,
            weight: String::new(),
            reps: Some(String::new()),
        }
    }

    pub fn logged(weight: impl Into<String>, reps: Option<String>) -> Self {
        Self {
            checked: true,
            weight: weight.into(),
            reps,
        }
    }
}

/// One entry of a workout plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: String,
    /// Stable identity for history matching (exact string equality)
    pub name: String,
    /// Textual set count, e.g. "4 séries"
    #[serde(default)]
    pub sets: String,
    /// Textual rep target, e.g. "8-12" or "30s"
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_sets: Option<Vec<CompletedSet>>,
}

impl Exercise {
    /// Logged sets, empty when none were recorded
    pub fn logged_sets(&self) -> &[CompletedSet] {
        self.completed_sets.as_deref().unwrap_or(&[])
    }

    /// True when at least one set was logged for this exercise
    pub fn has_logged_sets(&self) -> bool {
        !self.logged_sets().is_empty()
    }

    /// Number of sets the plan asks for, or `default` when `sets` has no digits
    pub fn planned_set_count(&self, default: u32) -> u32 {
        if self.sets.chars().any(|c| c.is_ascii_digit()) {
            parse_numeric_prefix(&self.sets)
        } else {
            default
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Older entries may carry numbers (or null) where text is expected.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(String::from).unwrap_or_default())
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planned_set_count() {
        let mut ex = Exercise {
            name: "Remada Curvada".to_string(),
            sets: "4 séries".to_string(),
            ..Default::default()
        };
        assert_eq!(ex.planned_set_count(3), 4);

        ex.sets = "algumas".to_string();
        assert_eq!(ex.planned_set_count(3), 3);
    }

    #[test]
    fn test_set_accepts_numeric_weight() {
        let json = r#"{"checked": true, "weight": 42.5, "reps": 10}"#;
        let set: CompletedSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.weight, "42.5");
        assert_eq!(set.reps.as_deref(), Some("10"));
    }

    #[test]
    fn test_set_null_weight_is_empty() {
        let json = r#"{"checked": false, "weight": null}"#;
        let set: CompletedSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.weight, "");
        assert!(set.reps.is_none());
    }

    #[test]
    fn test_exercise_camel_case_roundtrip() {
        let ex = Exercise {
            id: "ex-1".to_string(),
            name: "Supino Reto".to_string(),
            sets: "3".to_string(),
            reps: "10".to_string(),
            description: String::new(),
            completed_sets: Some(vec![CompletedSet::logged("40", Some("10".to_string()))]),
        };
        let json = serde_json::to_string(&ex).unwrap();
        assert!(json.contains("completedSets"));
        let back: Exercise = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ex);
    }
}
