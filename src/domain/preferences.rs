use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessLevel {
    #[serde(rename = "Iniciante")]
    Beginner,
    #[serde(rename = "Intermediário")]
    Intermediate,
    #[serde(rename = "Avançado")]
    Advanced,
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "Iniciante",
            Self::Intermediate => "Intermediário",
            Self::Advanced => "Avançado",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FitnessLevel {
    type Err = String;

    /// Accepts the stored Portuguese names and their English equivalents
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iniciante" | "beginner" => Ok(Self::Beginner),
            "intermediário" | "intermediario" | "intermediate" => Ok(Self::Intermediate),
            "avançado" | "avancado" | "advanced" => Ok(Self::Advanced),
            _ => Err(format!("unknown level '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingLocation {
    #[serde(rename = "Academia")]
    Gym,
    #[serde(rename = "Casa/Parque")]
    Home,
}

impl fmt::Display for TrainingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gym => "Academia",
            Self::Home => "Casa/Parque",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TrainingLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "academia" | "gym" => Ok(Self::Gym),
            "casa/parque" | "casa" | "parque" | "home" => Ok(Self::Home),
            _ => Err(format!("unknown location '{}'", s)),
        }
    }
}

/// Last parameters used to request a generated workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiPreferences {
    pub level: Option<FitnessLevel>,
    pub location: Option<TrainingLocation>,
    pub equipment: Vec<String>,
    /// Minutes
    pub duration: Option<u32>,
    pub focus: Option<String>,
}
