//! Core domain types for ironlog

mod exercise;
pub mod planner;
mod preferences;
mod profile;
mod records;
mod workout;

pub use exercise::{CompletedSet, Exercise};
pub use planner::{
    CustomExercise, CustomWorkoutPlan, DayOfWeek, GeneratedExercise, GeneratedPlan,
    GeneratedWeeklyPlan, WeeklySchedule,
};
pub use preferences::{AiPreferences, FitnessLevel, TrainingLocation};
pub use profile::{DEFAULT_XP_TO_NEXT_LEVEL, GalleryImage, UserProfile, UserStats};
pub use records::PersonalRecords;
pub use workout::{HistoricalWorkout, WorkoutPlan};
