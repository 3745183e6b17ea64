//! Centralized analysis configuration
//!
//! Every tunable cutoff used by the calculators lives here instead of being
//! hard-coded at the call site. Values can come from presets, a YAML file, or
//! the `NEWTON_CONFIG` environment variable.
//!
//! ```rust
//! use newton_core::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! let strict = AnalysisConfig::strict();
//! assert!(strict.verdict.elite > config.verdict.elite);
//! ```

use crate::error::{ConfigError, ValidationError};
use crate::squad::formation::Formation;
use crate::squad::position::PositionGroup;
use crate::squad::roles::RoleDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

/// Environment variable holding the path of a YAML config file.
pub const CONFIG_ENV_VAR: &str = "NEWTON_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub verdict: VerdictCutoffs,
    #[serde(default)]
    pub bench: BenchConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    /// Replaces the built-in role catalog when present.
    #[serde(default)]
    pub roles: Option<Vec<RoleDefinition>>,
    /// Replaces the built-in formation catalog when present.
    #[serde(default)]
    pub formations: Option<Vec<Formation>>,
}

/// Score cutoffs (0-100) for role verdicts. Below `average` is POOR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictCutoffs {
    pub elite: f64,
    pub good: f64,
    pub average: f64,
}

impl Default for VerdictCutoffs {
    fn default() -> Self {
        Self {
            elite: 85.0,
            good: 70.0,
            average: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub size: usize,
    /// Guaranteed bench coverage per broad position group.
    pub minimums: BTreeMap<PositionGroup, usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let mut minimums = BTreeMap::new();
        minimums.insert(PositionGroup::Goalkeeper, 1);
        minimums.insert(PositionGroup::Defence, 2);
        minimums.insert(PositionGroup::Midfield, 2);
        minimums.insert(PositionGroup::Attack, 1);
        Self { size: 7, minimums }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// An alternative role must reach this score to be suggested.
    pub min_score: f64,
    /// Required gain over the current role for interchangeable roles.
    pub min_improvement: f64,
    /// Required gain when a pair-specific detector does not fire.
    pub detector_fallback_margin: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            min_score: 65.0,
            min_improvement: 10.0,
            detector_fallback_margin: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    pub near_capacity: f64,
    pub at_capacity: f64,
    pub overloaded_above: f64,
    /// Share of overloaded recruiters that makes the team critical.
    pub critical_overloaded_ratio: f64,
    /// Share of at-capacity + overloaded recruiters that raises a warning.
    pub warning_busy_ratio: f64,
    /// Average load (percent) below which the team is underutilized.
    pub underutilized_average_pct: f64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            near_capacity: 0.70,
            at_capacity: 0.90,
            overloaded_above: 1.00,
            critical_overloaded_ratio: 0.3,
            warning_busy_ratio: 0.5,
            underutilized_average_pct: 50.0,
        }
    }
}

/// Cutoffs on the performance index, where 100 is the category average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub elite_index: f64,
    pub good_index: f64,
    pub average_index: f64,
    pub contract_warning_months: u32,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            elite_index: 120.0,
            good_index: 100.0,
            average_index: 85.0,
            contract_warning_months: 12,
        }
    }
}

impl AnalysisConfig {
    /// Higher bar for ELITE/GOOD verdicts.
    pub fn strict() -> Self {
        Self {
            verdict: VerdictCutoffs {
                elite: 90.0,
                good: 75.0,
                average: 55.0,
            },
            ..Self::default()
        }
    }

    /// Lower bar, useful for weaker leagues.
    pub fn lenient() -> Self {
        Self {
            verdict: VerdictCutoffs {
                elite: 80.0,
                good: 65.0,
                average: 45.0,
            },
            ..Self::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Loads the file named by `NEWTON_CONFIG`, or defaults when unset.
    pub fn from_env_or_default() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => {
                tracing::info!(path = ?path, "loading analysis config");
                Self::from_path(Path::new(&path))
            }
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.verdict;
        ordered("verdict", "elite >= good >= average", &[v.elite, v.good, v.average])?;
        let c = &self.capacity;
        ordered(
            "capacity",
            "overloaded_above >= at_capacity >= near_capacity",
            &[c.overloaded_above, c.at_capacity, c.near_capacity],
        )?;
        let b = &self.benchmark;
        ordered(
            "benchmark",
            "elite_index >= good_index >= average_index",
            &[b.elite_index, b.good_index, b.average_index],
        )?;
        if let Some(roles) = &self.roles {
            for role in roles {
                role.validate()?;
            }
        }
        Ok(())
    }
}

/// Fails unless `values` is non-increasing.
fn ordered(
    section: &'static str,
    expected: &'static str,
    values: &[f64],
) -> Result<(), ValidationError> {
    if values.windows(2).all(|pair| pair[0] >= pair[1]) {
        Ok(())
    } else {
        Err(ValidationError::UnorderedCutoffs { section, expected })
    }
}
