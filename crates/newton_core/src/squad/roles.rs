//! Role definitions and the built-in role catalog

use super::position::PositionCategory;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

fn default_weight() -> f64 {
    1.0
}

/// Three-point scale for one metric within a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricThreshold {
    pub metric: String,
    pub good: f64,
    pub ok: f64,
    pub poor: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl MetricThreshold {
    pub fn new(metric: impl Into<String>, good: f64, ok: f64, poor: f64) -> Self {
        Self {
            metric: metric.into(),
            good,
            ok,
            poor,
            weight: default_weight(),
        }
    }

    /// Lower-is-better metrics (goals conceded) list `good` below `poor`.
    pub fn direction(&self) -> MetricDirection {
        if self.good >= self.poor {
            MetricDirection::HigherIsBetter
        } else {
            MetricDirection::LowerIsBetter
        }
    }

    fn validate(&self, role: &str) -> Result<(), ValidationError> {
        let ordered = match self.direction() {
            MetricDirection::HigherIsBetter => self.good >= self.ok && self.ok >= self.poor,
            MetricDirection::LowerIsBetter => self.good <= self.ok && self.ok <= self.poor,
        };
        let finite = self.good.is_finite() && self.ok.is_finite() && self.poor.is_finite();
        if !ordered || !finite {
            return Err(ValidationError::UnorderedThresholds {
                role: role.to_string(),
                metric: self.metric.clone(),
                good: self.good,
                ok: self.ok,
                poor: self.poor,
            });
        }
        if self.weight.is_nan() || self.weight <= 0.0 {
            return Err(ValidationError::NonPositiveWeight {
                role: role.to_string(),
                metric: self.metric.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    pub display_name: String,
    pub category: PositionCategory,
    #[serde(default)]
    pub description: String,
    pub thresholds: Vec<MetricThreshold>,
    #[serde(default)]
    pub interchangeable_with: Vec<String>,
}

impl RoleDefinition {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "Role name" });
        }
        if self.thresholds.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "Role thresholds",
            });
        }
        self.thresholds
            .iter()
            .try_for_each(|t| t.validate(&self.name))
    }

    pub fn is_interchangeable_with(&self, other: &str) -> bool {
        self.interchangeable_with.iter().any(|r| r == other)
    }
}

/// Ordered set of role definitions. Catalog order breaks score ties.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCatalog {
    roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<RoleDefinition>) -> Result<Self, ValidationError> {
        for role in &roles {
            role.validate()?;
        }
        Ok(Self { roles })
    }

    /// The twelve standard roles.
    pub fn standard() -> Self {
        Self {
            roles: standard_roles(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Catalog position of a role, used as the final tie-break.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.roles.iter().position(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn role(
    name: &str,
    display_name: &str,
    category: PositionCategory,
    description: &str,
    thresholds: &[(&str, f64, f64, f64)],
    interchangeable_with: &[&str],
) -> RoleDefinition {
    RoleDefinition {
        name: name.to_string(),
        display_name: display_name.to_string(),
        category,
        description: description.to_string(),
        thresholds: thresholds
            .iter()
            .map(|(m, good, ok, poor)| MetricThreshold::new(*m, *good, *ok, *poor))
            .collect(),
        interchangeable_with: interchangeable_with.iter().map(|s| s.to_string()).collect(),
    }
}

fn standard_roles() -> Vec<RoleDefinition> {
    use PositionCategory::*;

    vec![
        role(
            "GK",
            "Goalkeeper",
            GK,
            "Shot-stopping and distribution",
            &[
                ("xgp_90", 0.25, 0.0, -0.38),
                ("conceded_90", 0.75, 1.41, 2.15),
                ("interceptions_90", 0.22, 0.10, 0.04),
                ("pass_pct", 97.0, 78.0, 47.0),
            ],
            &[],
        ),
        role(
            "CB-STOPPER",
            "Center-Back",
            CB,
            "Tackling and aerial dominance",
            &[
                ("tackles_90", 2.38, 1.29, 0.80),
                ("header_win_pct", 82.0, 72.0, 59.0),
                ("clearances_90", 1.64, 0.85, 0.44),
                ("interceptions_90", 3.18, 2.15, 1.36),
                ("blocks_90", 0.72, 0.42, 0.19),
            ],
            &["BCB"],
        ),
        role(
            "BCB",
            "Ball-Playing Center-Back",
            CB,
            "Distribution and possession from the back line",
            &[
                ("tackles_90", 2.0, 1.2, 0.7),
                ("clearances_90", 1.5, 0.8, 0.4),
                ("interceptions_90", 3.0, 2.0, 1.3),
                ("blocks_90", 0.6, 0.35, 0.15),
                ("prog_passes_90", 5.5, 3.5, 2.0),
                ("pass_pct", 92.0, 85.0, 78.0),
            ],
            &["CB-STOPPER", "FB"],
        ),
        role(
            "FB",
            "Full-Back",
            FB,
            "Balanced defending and width",
            &[
                ("tackles_90", 2.2, 1.4, 0.9),
                ("interceptions_90", 2.8, 1.8, 1.0),
                ("pressures_90", 12.0, 8.0, 5.0),
                ("crosses_90", 0.5, 0.25, 0.1),
                ("prog_passes_90", 4.5, 2.5, 1.5),
                ("pass_pct", 88.0, 80.0, 72.0),
            ],
            &["WB", "BCB"],
        ),
        role(
            "WB",
            "Wing-Back",
            FB,
            "Attacking width with defensive duties",
            &[
                ("tackles_90", 2.0, 1.2, 0.7),
                ("interceptions_90", 2.5, 1.5, 0.9),
                ("pressures_90", 11.0, 7.5, 4.5),
                ("dribbles_90", 3.0, 1.8, 1.0),
                ("crosses_90", 0.6, 0.3, 0.15),
                ("sprints_90", 14.0, 10.0, 7.0),
            ],
            &["FB", "WAP"],
        ),
        role(
            "MD",
            "Defensive Midfielder",
            DM,
            "Ball winning in front of the defence",
            &[
                ("tackles_90", 2.5, 1.6, 1.0),
                ("interceptions_90", 3.0, 2.0, 1.2),
                ("blocks_90", 0.5, 0.3, 0.15),
                ("pressures_90", 13.0, 9.0, 6.0),
                ("pass_pct", 90.0, 83.0, 76.0),
            ],
            &["MC"],
        ),
        role(
            "MC",
            "Central Midfielder",
            CM,
            "Playmaking from central midfield",
            &[
                ("key_passes_90", 1.5, 0.8, 0.4),
                ("prog_passes_90", 5.0, 3.0, 1.8),
                ("xassists_90", 0.15, 0.08, 0.04),
                ("dribbles_90", 2.5, 1.5, 0.8),
                ("pass_pct", 89.0, 82.0, 75.0),
                ("tackles_90", 1.8, 1.0, 0.5),
            ],
            &["MD", "AM(C)"],
        ),
        role(
            "AM(C)",
            "Attacking Midfielder (C)",
            AM,
            "Creating and scoring between the lines",
            &[
                ("key_passes_90", 2.0, 1.2, 0.6),
                ("xassists_90", 0.20, 0.12, 0.06),
                ("dribbles_90", 3.5, 2.0, 1.0),
                ("pass_pct", 86.0, 78.0, 70.0),
                ("shots_on_target_90", 0.8, 0.5, 0.25),
                ("xg_90", 0.25, 0.15, 0.08),
            ],
            &["MC", "WAP", "WAS"],
        ),
        role(
            "WAP",
            "Winger",
            W,
            "Wide provider, crossing and creating",
            &[
                ("dribbles_90", 4.0, 2.5, 1.5),
                ("crosses_90", 0.7, 0.4, 0.2),
                ("sprints_90", 16.0, 12.0, 8.0),
                ("key_passes_90", 1.8, 1.0, 0.5),
                ("xassists_90", 0.22, 0.13, 0.07),
            ],
            &["WAS", "AM(C)", "WB"],
        ),
        role(
            "WAS",
            "Inside Forward",
            W,
            "Wide scorer, cutting inside to finish",
            &[
                ("dribbles_90", 4.5, 3.0, 1.8),
                ("shots_on_target_90", 1.2, 0.7, 0.4),
                ("sprints_90", 17.0, 13.0, 9.0),
                ("xg_90", 0.38, 0.22, 0.12),
                ("conversion_pct", 25.0, 18.0, 12.0),
            ],
            &["WAP", "ST-GS", "AM(C)"],
        ),
        role(
            "ST-PROVIDER",
            "Target Forward",
            ST,
            "Target man and link play",
            &[
                ("headers_won_90", 1.2, 0.7, 0.4),
                ("xassists_90", 0.18, 0.10, 0.05),
                ("xg_90", 0.35, 0.22, 0.13),
                ("shots_on_target_90", 1.0, 0.6, 0.35),
                ("key_passes_90", 1.3, 0.7, 0.35),
            ],
            &["ST-GS", "WAP"],
        ),
        role(
            "ST-GS",
            "Advanced Forward",
            ST,
            "Pure finisher",
            &[
                ("headers_won_90", 1.0, 0.6, 0.3),
                ("dribbles_90", 2.5, 1.5, 0.8),
                ("xg_90", 0.45, 0.28, 0.16),
                ("shots_on_target_90", 1.5, 0.9, 0.5),
                ("conversion_pct", 28.0, 20.0, 14.0),
            ],
            &["ST-PROVIDER", "WAS"],
        ),
    ]
}
