//! Role scoring
//!
//! Each metric is placed on a 0-100 scale against the role's thresholds:
//!
//! | value            | score                      |
//! |------------------|----------------------------|
//! | >= good          | 100                        |
//! | ok .. good       | 70 .. 100 (linear)         |
//! | poor .. ok       | 40 .. 70 (linear)          |
//! | < poor           | 40 x value/poor, or 20     |
//!
//! The role score is the weighted mean of its metric scores.

use super::player::Player;
use super::position::{playable_roles, PositionCategory};
use super::roles::{MetricDirection, MetricThreshold, RoleCatalog, RoleDefinition};
use crate::config::VerdictCutoffs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricTier {
    Elite,
    Good,
    Average,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Elite,
    Good,
    Average,
    Poor,
}

impl Verdict {
    pub fn from_score(score: f64, cutoffs: &VerdictCutoffs) -> Self {
        if score >= cutoffs.elite {
            Self::Elite
        } else if score >= cutoffs.good {
            Self::Good
        } else if score >= cutoffs.average {
            Self::Average
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Elite => "ELITE",
            Self::Good => "GOOD",
            Self::Average => "AVERAGE",
            Self::Poor => "POOR",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub metric: String,
    /// `None` when the player has no data for this metric.
    pub value: Option<f64>,
    pub score: f64,
    pub tier: MetricTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScore {
    pub role: String,
    pub display_name: String,
    pub category: PositionCategory,
    pub score: f64,
    pub verdict: Verdict,
    pub metrics: Vec<MetricScore>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RoleEvaluator {
    cutoffs: VerdictCutoffs,
}

impl RoleEvaluator {
    pub fn new(cutoffs: VerdictCutoffs) -> Self {
        Self { cutoffs }
    }

    /// Scores one metric value. Lower-is-better metrics are mirrored so the
    /// same bands apply.
    pub fn score_metric(value: f64, threshold: &MetricThreshold) -> (MetricTier, f64) {
        let (value, good, ok, poor) = match threshold.direction() {
            MetricDirection::HigherIsBetter => (value, threshold.good, threshold.ok, threshold.poor),
            MetricDirection::LowerIsBetter => {
                (-value, -threshold.good, -threshold.ok, -threshold.poor)
            }
        };

        if value >= good {
            (MetricTier::Elite, 100.0)
        } else if value >= ok {
            (MetricTier::Good, 70.0 + 30.0 * band_position(value, ok, good))
        } else if value >= poor {
            (MetricTier::Average, 40.0 + 30.0 * band_position(value, poor, ok))
        } else if poor > 0.0 {
            (MetricTier::Critical, (40.0 * value / poor).max(0.0))
        } else {
            (MetricTier::Critical, 20.0)
        }
    }

    pub fn evaluate(&self, metrics: &BTreeMap<&str, f64>, role: &RoleDefinition) -> RoleScore {
        let mut scored = Vec::with_capacity(role.thresholds.len());
        let mut missing = Vec::new();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for threshold in &role.thresholds {
            let value = metrics.get(threshold.metric.as_str()).copied();
            let (tier, score) = match value {
                Some(v) => Self::score_metric(v, threshold),
                None => {
                    tracing::warn!(
                        role = %role.name,
                        metric = %threshold.metric,
                        "metric missing, scored as zero"
                    );
                    missing.push(threshold.metric.clone());
                    (MetricTier::Critical, 0.0)
                }
            };
            weighted_sum += score * threshold.weight;
            total_weight += threshold.weight;
            scored.push(MetricScore {
                metric: threshold.metric.clone(),
                value,
                score,
                tier,
            });
        }

        let score = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };
        let pick = |tier: MetricTier| -> Vec<String> {
            scored
                .iter()
                .filter(|m| m.tier == tier)
                .map(|m| m.metric.clone())
                .collect()
        };

        RoleScore {
            role: role.name.clone(),
            display_name: role.display_name.clone(),
            category: role.category,
            score,
            verdict: Verdict::from_score(score, &self.cutoffs),
            strengths: pick(MetricTier::Elite),
            weaknesses: pick(MetricTier::Critical),
            metrics: scored,
            missing,
        }
    }

    /// Scores the player in every role their position allows, best first.
    ///
    /// Ties keep catalog order. A position that maps to no catalog role
    /// is scored in every role.
    pub fn evaluate_player(&self, player: &Player, catalog: &RoleCatalog) -> Vec<RoleScore> {
        let _span = tracing::debug_span!("evaluate_player", player = %player.name).entered();

        let playable: Vec<&str> = playable_roles(&player.position)
            .into_iter()
            .filter(|r| catalog.contains(r))
            .collect();
        let metrics = player.normalized_metrics();

        let mut scores: Vec<RoleScore> = catalog
            .iter()
            .filter(|role| playable.is_empty() || playable.contains(&role.name.as_str()))
            .map(|role| self.evaluate(&metrics, role))
            .collect();
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            roles = scores.len(),
            best = scores.first().map(|s| s.role.as_str()).unwrap_or("-"),
            "player evaluated"
        );
        scores
    }
}

/// Position of `value` within `[low, high)` as 0..1.
fn band_position(value: f64, low: f64, high: f64) -> f64 {
    let range = high - low;
    if range > 0.0 {
        ((value - low) / range).clamp(0.0, 1.0)
    } else {
        1.0
    }
}
