//! Role change suggestions
//!
//! A player's current role is their best-scoring role in their natural
//! position. Another
//! playable role is suggested when it clears the minimum score and either a
//! pair-specific detector fires or it is interchangeable with the current
//! role and clearly better.

use super::position::PositionCategory;
use super::roles::RoleCatalog;
use super::scoring::RoleScore;
use crate::config::RecommendationConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ChangeReason {
    /// The player's profile matches what the new role asks for.
    Profile { detector: String },
    /// The new role outscores the current one by a wide margin.
    Margin { gain: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleChange {
    pub from: String,
    pub to: String,
    pub current_score: f64,
    pub suggested_score: f64,
    pub reason: ChangeReason,
}

/// Metric floors that justify moving between two specific roles.
struct Detector {
    from: &'static str,
    to: &'static str,
    name: &'static str,
    /// Every metric must strictly exceed its floor.
    floors: &'static [(&'static str, f64)],
}

const DETECTORS: &[Detector] = &[
    Detector {
        from: "CB-STOPPER",
        to: "BCB",
        name: "ball-playing defender",
        floors: &[("prog_passes_90", 5.5), ("tackles_90", 1.5), ("pass_pct", 90.0)],
    },
    Detector {
        from: "FB",
        to: "WB",
        name: "attacking full-back",
        floors: &[("dribbles_90", 3.0), ("crosses_90", 0.3), ("sprints_90", 14.0)],
    },
    Detector {
        from: "MD",
        to: "MC",
        name: "creative holder",
        floors: &[("key_passes_90", 1.5), ("tackles_90", 1.5), ("prog_passes_90", 5.0)],
    },
    Detector {
        from: "AM(C)",
        to: "WAP",
        name: "wide creator",
        floors: &[("dribbles_90", 3.5), ("crosses_90", 0.4)],
    },
    Detector {
        from: "AM(C)",
        to: "WAS",
        name: "wide finisher",
        floors: &[("shots_on_target_90", 1.0), ("xg_90", 0.35), ("conversion_pct", 25.0)],
    },
];

fn detector_for(from: &str, to: &str) -> Option<&'static Detector> {
    DETECTORS.iter().find(|d| d.from == from && d.to == to)
}

pub struct RoleAdvisor<'a> {
    catalog: &'a RoleCatalog,
    config: RecommendationConfig,
}

impl<'a> RoleAdvisor<'a> {
    pub fn new(catalog: &'a RoleCatalog, config: RecommendationConfig) -> Self {
        Self { catalog, config }
    }

    fn interchangeable(&self, a: &str, b: &str) -> bool {
        let listed = |x: &str, y: &str| {
            self.catalog
                .get(x)
                .map(|r| r.is_interchangeable_with(y))
                .unwrap_or(false)
        };
        listed(a, b) || listed(b, a)
    }

    fn judge(
        &self,
        metrics: &BTreeMap<&str, f64>,
        current: &RoleScore,
        alternative: &RoleScore,
    ) -> Option<ChangeReason> {
        if alternative.score < self.config.min_score {
            return None;
        }
        let gain = alternative.score - current.score;

        if let Some(detector) = detector_for(&current.role, &alternative.role) {
            // absent metrics count as zero and never clear a floor
            let fires = detector
                .floors
                .iter()
                .all(|(metric, floor)| metrics.get(metric).copied().unwrap_or(0.0) > *floor);
            if fires {
                return Some(ChangeReason::Profile {
                    detector: detector.name.to_string(),
                });
            }
            return (gain > self.config.detector_fallback_margin)
                .then_some(ChangeReason::Margin { gain });
        }

        if self.interchangeable(&current.role, &alternative.role)
            && gain > self.config.min_improvement
        {
            return Some(ChangeReason::Margin { gain });
        }
        None
    }

    /// Suggestions from scored roles (best first, as returned by
    /// `RoleEvaluator::evaluate_player`), largest gain first.
    ///
    /// The current role is the best-scoring role in `natural`, the player's
    /// natural position; the overall best role when none of the scored
    /// roles belongs to it.
    pub fn suggest(
        &self,
        metrics: &BTreeMap<&str, f64>,
        scores: &[RoleScore],
        natural: PositionCategory,
    ) -> Vec<RoleChange> {
        let Some(current) = scores
            .iter()
            .find(|s| s.category == natural)
            .or_else(|| scores.first())
        else {
            return Vec::new();
        };

        let mut changes: Vec<RoleChange> = scores
            .iter()
            .filter(|alt| alt.role != current.role)
            .filter_map(|alt| {
                self.judge(metrics, current, alt).map(|reason| RoleChange {
                    from: current.role.clone(),
                    to: alt.role.clone(),
                    current_score: current.score,
                    suggested_score: alt.score,
                    reason,
                })
            })
            .collect();
        changes.sort_by(|a, b| {
            (b.suggested_score - b.current_score).total_cmp(&(a.suggested_score - a.current_score))
        });
        changes
    }
}
