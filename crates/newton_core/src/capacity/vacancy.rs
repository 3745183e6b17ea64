//! Vacancy and recruiter models

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty of filling a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleDifficulty {
    Easy,
    Medium,
    Hard,
}

impl RoleDifficulty {
    pub const ALL: [RoleDifficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Vacancies of this difficulty one recruiter can carry at full load.
    pub fn full_load_count(self) -> f64 {
        match self {
            Self::Easy => 30.0,
            Self::Medium => 20.0,
            Self::Hard => 12.0,
        }
    }

    /// Share of a recruiter's capacity used by one external, stage-less vacancy.
    pub fn base_load(self) -> f64 {
        1.0 / self.full_load_count()
    }
}

impl FromStr for RoleDifficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ValidationError::InvalidRoleType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for RoleDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(s)
    }
}

/// Where a vacancy currently sits in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitmentStage {
    Sourcing,
    Screening,
    Interview,
    Offer,
    PreHireChecks,
    #[default]
    None,
}

impl RecruitmentStage {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sourcing => 0.2,
            Self::Screening => 0.4,
            Self::Interview => 0.2,
            Self::Offer => 0.1,
            Self::PreHireChecks => 0.1,
            Self::None => 1.0,
        }
    }
}

impl FromStr for RecruitmentStage {
    type Err = ValidationError;

    /// Blank input is the only value that falls back to `None`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Self::None),
            "sourcing" => Ok(Self::Sourcing),
            "screening" => Ok(Self::Screening),
            "interview" => Ok(Self::Interview),
            "offer" => Ok(Self::Offer),
            "pre-hire checks" | "pre-hire" | "prehire" | "pre hire checks" => {
                Ok(Self::PreHireChecks)
            }
            _ => Err(ValidationError::InvalidStage(s.trim().to_string())),
        }
    }
}

impl fmt::Display for RecruitmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sourcing => "Sourcing",
            Self::Screening => "Screening",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::PreHireChecks => "Pre-Hire Checks",
            Self::None => "None",
        };
        f.write_str(s)
    }
}

/// Parses a yes/no cell. Blank means external.
pub fn parse_internal_flag(s: &str) -> Result<bool, ValidationError> {
    match s.trim().to_lowercase().as_str() {
        "" | "no" | "n" | "false" => Ok(false),
        "yes" | "y" | "true" => Ok(true),
        _ => Err(ValidationError::InvalidInternalFlag(s.trim().to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub name: String,
    pub difficulty: RoleDifficulty,
    pub internal: bool,
    pub stage: RecruitmentStage,
}

impl Vacancy {
    pub fn new(
        name: impl Into<String>,
        difficulty: RoleDifficulty,
        internal: bool,
        stage: RecruitmentStage,
    ) -> Self {
        Self {
            name: name.into(),
            difficulty,
            internal,
            stage,
        }
    }
}

/// A recruiter and the vacancies they carry. Load is always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recruiter {
    pub name: String,
    pub vacancies: Vec<Vacancy>,
}

impl Recruiter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vacancies: Vec::new(),
        }
    }

    pub fn with_vacancies(mut self, vacancies: impl IntoIterator<Item = Vacancy>) -> Self {
        self.vacancies.extend(vacancies);
        self
    }

    pub fn vacancy_count(&self) -> usize {
        self.vacancies.len()
    }
}
