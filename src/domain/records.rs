use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Highest max weight ever logged, per exercise name.
///
/// Values only ever move upward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalRecords(BTreeMap<String, f64>);

impl PersonalRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored record for `name`, if any
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// First alias with a non-zero record, or 0
    pub fn best_of(&self, aliases: &[&str]) -> f64 {
        aliases
            .iter()
            .filter_map(|name| self.get(name))
            .find(|weight| *weight != 0.0)
            .unwrap_or(0.0)
    }

    /// Raise the record for `name` to `weight` when it is higher.
    /// Returns true when the stored value changed.
    pub fn raise(&mut self, name: &str, weight: f64) -> bool {
        let current = self.get(name).unwrap_or(0.0);
        if weight > current {
            self.0.insert(name.to_string(), weight);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }
}

impl FromIterator<(String, f64)> for PersonalRecords {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_is_monotonic() {
        let mut prs = PersonalRecords::new();
        assert!(prs.raise("Agachamento Livre", 100.0));
        assert!(!prs.raise("Agachamento Livre", 90.0));
        assert!(!prs.raise("Agachamento Livre", 100.0));
        assert_eq!(prs.get("Agachamento Livre"), Some(100.0));
    }

    #[test]
    fn test_zero_weight_never_stored() {
        let mut prs = PersonalRecords::new();
        assert!(!prs.raise("Prancha", 0.0));
        assert!(prs.is_empty());
    }

    #[test]
    fn test_best_of_skips_zero_aliases() {
        let prs: PersonalRecords = [
            ("Supino Reto com Barra".to_string(), 0.0),
            ("Supino Reto".to_string(), 102.5),
        ]
        .into_iter()
        .collect();
        assert_eq!(prs.best_of(&["Supino Reto com Barra", "Supino Reto"]), 102.5);
        assert_eq!(prs.best_of(&["Levantamento Terra"]), 0.0);
    }
}
