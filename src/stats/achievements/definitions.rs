//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock conditions. Unlock
//! state is never stored; it is recomputed from history, stats and records.

use serde::{Serialize, Serializer};

use crate::domain::UserStats;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    // Milestones
    FirstWorkout,
    TenWorkouts,
    TwentyFiveWorkouts,
    FiftyWorkouts,
    OneHundredWorkouts,

    // Volume
    Lift10000Kg,
    Lift50000Kg,

    // Consistency
    WeekStreak,

    // Specialization
    ChestSpecialist,
    LegsSpecialist,
    BackSpecialist,
    FullBodyWorkout,

    // Secret feats of strength
    SecretBench100Kg,
    SecretSquat140Kg,
    SecretDeadlift180Kg,
}

impl AchievementId {
    /// Stable string form, used in output and persisted data
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstWorkout => "FIRST_WORKOUT",
            Self::TenWorkouts => "TEN_WORKOUTS",
            Self::TwentyFiveWorkouts => "TWENTY_FIVE_WORKOUTS",
            Self::FiftyWorkouts => "FIFTY_WORKOUTS",
            Self::OneHundredWorkouts => "ONE_HUNDRED_WORKOUTS",
            Self::Lift10000Kg => "LIFT_10000KG",
            Self::Lift50000Kg => "LIFT_50000KG",
            Self::WeekStreak => "WEEK_STREAK",
            Self::ChestSpecialist => "CHEST_SPECIALIST",
            Self::LegsSpecialist => "LEGS_SPECIALIST",
            Self::BackSpecialist => "BACK_SPECIALIST",
            Self::FullBodyWorkout => "FULL_BODY_WORKOUT",
            Self::SecretBench100Kg => "SECRET_BENCH_100KG",
            Self::SecretSquat140Kg => "SECRET_SQUAT_140KG",
            Self::SecretDeadlift180Kg => "SECRET_DEADLIFT_180KG",
        }
    }

    /// Parse from the string form
    pub fn parse(s: &str) -> Option<Self> {
        ACHIEVEMENTS
            .iter()
            .map(|a| a.id)
            .find(|id| id.as_str() == s)
    }
}

impl Serialize for AchievementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Aggregate statistic an achievement can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    TotalWorkouts,
    CurrentStreak,
    TotalVolume,
    TimeSpent,
}

impl Stat {
    pub fn value(&self, stats: &UserStats) -> u64 {
        match self {
            Self::TotalWorkouts => u64::from(stats.total_workouts),
            Self::CurrentStreak => u64::from(stats.current_streak),
            Self::TotalVolume => stats.total_volume,
            Self::TimeSpent => stats.time_spent,
        }
    }
}

/// Unlock condition, evaluated by [`is_met`](super::checker::is_met)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Condition {
    /// Number of completed workouts
    WorkoutCount { at_least: usize },
    StatThreshold { stat: Stat, at_least: u64 },
    /// Personal record under the first alias with a non-zero value
    NamedRecord {
        exercises: &'static [&'static str],
        at_least: f64,
    },
    /// Workouts whose focus contains any keyword (case-insensitive)
    FocusCount {
        keywords: &'static [&'static str],
        at_least: usize,
    },
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    /// Icon name for front ends
    pub icon: &'static str,
    pub is_secret: bool,
    pub condition: Condition,
}

impl Achievement {
    pub fn find(id: AchievementId) -> Option<&'static Achievement> {
        ACHIEVEMENTS.iter().find(|a| a.id == id)
    }
}

const SECRET: &str = "Segredo: ???";

/// All achievement definitions, in display order
pub static ACHIEVEMENTS: &[Achievement] = &[
    // === MILESTONES ===
    Achievement {
        id: AchievementId::FirstWorkout,
        title: "Que Comecem os Jogos!",
        description: "Completou seu primeiro treino.",
        icon: "flame",
        is_secret: false,
        condition: Condition::WorkoutCount { at_least: 1 },
    },
    Achievement {
        id: AchievementId::TenWorkouts,
        title: "Rato de Academia",
        description: "Completou 10 treinos.",
        icon: "dumbbell",
        is_secret: false,
        condition: Condition::WorkoutCount { at_least: 10 },
    },
    Achievement {
        id: AchievementId::TwentyFiveWorkouts,
        title: "Habituado",
        description: "Completou 25 treinos.",
        icon: "repeat",
        is_secret: false,
        condition: Condition::WorkoutCount { at_least: 25 },
    },
    Achievement {
        id: AchievementId::FiftyWorkouts,
        title: "Veterano",
        description: "Completou 50 treinos.",
        icon: "medal",
        is_secret: false,
        condition: Condition::WorkoutCount { at_least: 50 },
    },
    Achievement {
        id: AchievementId::OneHundredWorkouts,
        title: "Centurião",
        description: "Completou 100 treinos.",
        icon: "diamond",
        is_secret: false,
        condition: Condition::WorkoutCount { at_least: 100 },
    },
    // === VOLUME ===
    Achievement {
        id: AchievementId::Lift10000Kg,
        title: "Hulk!",
        description: "Levantou um total de 10 toneladas de volume.",
        icon: "trophy",
        is_secret: false,
        condition: Condition::StatThreshold {
            stat: Stat::TotalVolume,
            at_least: 10_000,
        },
    },
    Achievement {
        id: AchievementId::Lift50000Kg,
        title: "Titan",
        description: "Levantou um total de 50 toneladas de volume.",
        icon: "mountain",
        is_secret: false,
        condition: Condition::StatThreshold {
            stat: Stat::TotalVolume,
            at_least: 50_000,
        },
    },
    // === CONSISTENCY ===
    Achievement {
        id: AchievementId::WeekStreak,
        title: "Consistência é a Chave",
        description: "Treinou por 7 dias seguidos.",
        icon: "calendar",
        is_secret: false,
        condition: Condition::StatThreshold {
            stat: Stat::CurrentStreak,
            at_least: 7,
        },
    },
    // === SPECIALIZATION ===
    Achievement {
        id: AchievementId::ChestSpecialist,
        title: "Peito de Aço",
        description: "Concluiu 10 treinos com foco em Peito.",
        icon: "zap",
        is_secret: false,
        condition: Condition::FocusCount {
            keywords: &["peito", "chest"],
            at_least: 10,
        },
    },
    Achievement {
        id: AchievementId::LegsSpecialist,
        title: "Não Pula Pernas",
        description: "Concluiu 10 treinos com foco em Pernas.",
        icon: "zap",
        is_secret: false,
        condition: Condition::FocusCount {
            keywords: &["pernas", "legs"],
            at_least: 10,
        },
    },
    Achievement {
        id: AchievementId::BackSpecialist,
        title: "Costas de Aço",
        description: "Concluiu 10 treinos com foco em Costas.",
        icon: "zap",
        is_secret: false,
        condition: Condition::FocusCount {
            keywords: &["costas", "back"],
            at_least: 10,
        },
    },
    Achievement {
        id: AchievementId::FullBodyWorkout,
        title: "Corpo Blindado",
        description: "Concluiu um treino 'Corpo Inteiro'.",
        icon: "brain-circuit",
        is_secret: false,
        condition: Condition::FocusCount {
            keywords: &["corpo inteiro"],
            at_least: 1,
        },
    },
    // === SECRET ===
    Achievement {
        id: AchievementId::SecretBench100Kg,
        title: "Clube dos 100kg",
        description: SECRET,
        icon: "sparkles",
        is_secret: true,
        condition: Condition::NamedRecord {
            exercises: &["Supino Reto com Barra", "Supino Reto"],
            at_least: 100.0,
        },
    },
    Achievement {
        id: AchievementId::SecretSquat140Kg,
        title: "Agachamento Monstro",
        description: SECRET,
        icon: "sparkles",
        is_secret: true,
        condition: Condition::NamedRecord {
            exercises: &["Agachamento Livre", "Agachamento"],
            at_least: 140.0,
        },
    },
    Achievement {
        id: AchievementId::SecretDeadlift180Kg,
        title: "Força da Terra",
        description: SECRET,
        icon: "sparkles",
        is_secret: true,
        condition: Condition::NamedRecord {
            exercises: &["Levantamento Terra"],
            at_least: 180.0,
        },
    },
];
