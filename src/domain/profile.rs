use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// XP needed to go from level 1 to level 2 on a fresh profile
pub const DEFAULT_XP_TO_NEXT_LEVEL: u32 = 200;

/// Aggregate statistics, always recomputed from the full history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_workouts: u32,
    /// Consecutive calendar days ending today or yesterday
    pub current_streak: u32,
    /// Total lifted volume in kg, rounded
    pub total_volume: u64,
    /// Sum of nominal workout durations in minutes
    pub time_spent: u64,
}

/// Picture attached to the profile gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    /// Image data (usually a base64 data URL)
    pub src: String,
}

/// The user's profile.
///
/// Stored fields missing from older data fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub avatar: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub instagram: String,
    pub level: u32,
    /// XP accumulated inside the current level
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub stats: UserStats,
    #[serde(deserialize_with = "null_as_empty")]
    pub gallery: Vec<GalleryImage>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Atleta".to_string(),
            avatar: "🤖".to_string(),
            instagram: String::new(),
            level: 1,
            xp: 0,
            xp_to_next_level: DEFAULT_XP_TO_NEXT_LEVEL,
            stats: UserStats::default(),
            gallery: Vec::new(),
        }
    }
}

impl UserProfile {
    /// Add an image to the gallery, returning its new id
    pub fn add_gallery_image(&mut self, src: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.gallery.push(GalleryImage {
            id: id.clone(),
            src: src.into(),
        });
        id
    }

    /// Remove an image by id. Returns false when no image matched.
    pub fn remove_gallery_image(&mut self, id: &str) -> bool {
        let before = self.gallery.len();
        self.gallery.retain(|img| img.id != id);
        self.gallery.len() != before
    }

    /// Fraction of the current level already earned (0.0 - 1.0)
    pub fn level_progress(&self) -> f32 {
        if self.xp_to_next_level == 0 {
            1.0
        } else {
            (self.xp as f32 / self.xp_to_next_level as f32).min(1.0)
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_merges_defaults() {
        let json = r#"{"name": "Ana", "level": 3, "xp": 10, "instagram": null}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.level, 3);
        assert_eq!(profile.instagram, "");
        assert_eq!(profile.xp_to_next_level, DEFAULT_XP_TO_NEXT_LEVEL);
        assert!(profile.gallery.is_empty());
    }

    #[test]
    fn test_gallery_add_remove() {
        let mut profile = UserProfile::default();
        let id = profile.add_gallery_image("data:image/png;base64,AAAA");
        assert_eq!(profile.gallery.len(), 1);
        assert!(!profile.remove_gallery_image("missing"));
        assert!(profile.remove_gallery_image(&id));
        assert!(profile.gallery.is_empty());
    }

    #[test]
    fn test_level_progress() {
        let profile = UserProfile {
            xp: 50,
            ..Default::default()
        };
        assert!((profile.level_progress() - 0.25).abs() < f32::EPSILON);
    }
}
