//! Player model and metric normalization

use super::position::{category_from_selected, position_categories, PositionCategory, StatusFlag};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical metric name and the export columns it can be read from, in
/// order of preference.
const METRIC_SOURCES: &[(&str, &[&str])] = &[
    ("tackles_90", &["Tck/90", "K Tck/90"]),
    ("headers_won_90", &["Hdrs W/90"]),
    ("header_win_pct", &["Hdr %"]),
    ("clearances_90", &["Clr/90"]),
    ("interceptions_90", &["Int/90"]),
    ("blocks_90", &["Shts Blckd/90", "Blk/90"]),
    ("prog_passes_90", &["Pr passes/90"]),
    ("pressures_90", &["Pres C/90"]),
    ("dribbles_90", &["Drb/90"]),
    ("key_passes_90", &["OP-KP/90", "Ch C/90"]),
    ("xassists_90", &["xA/90"]),
    ("crosses_90", &["OP-Crs C/90"]),
    ("sprints_90", &["Sprints/90"]),
    ("shots_on_target_90", &["ShT/90", "Shot/90"]),
    ("xg_90", &["NP-xG/90", "xG"]),
    ("conversion_pct", &["Conv %"]),
    ("pass_pct", &["Pas %"]),
    ("xgp_90", &["xGP/90", "xGP"]),
    ("conceded_90", &["Con/90"]),
    ("save_pct", &["Sv %"]),
    ("tackle_ratio", &["Tck R"]),
];

/// A squad member as read from an export.
///
/// `stats` is keyed by the export column name; use
/// [`Player::normalized_metrics`] for the vocabulary roles are scored in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position_selected: String,
    pub position: String,
    pub status: StatusFlag,
    pub age: Option<u32>,
    /// Weekly wage.
    pub wage: Option<f64>,
    pub contract_expires: Option<NaiveDate>,
    /// Starts.
    pub appearances: u32,
    pub substitute_appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub minutes: Option<u32>,
    pub average_rating: Option<f64>,
    pub stats: BTreeMap<String, f64>,
}

impl Player {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    pub fn with_stat(mut self, column: impl Into<String>, value: f64) -> Self {
        self.stats.insert(column.into(), value);
        self
    }

    pub fn total_appearances(&self) -> u32 {
        self.appearances + self.substitute_appearances
    }

    /// Metrics in the canonical vocabulary. Metrics with no source column
    /// are absent rather than zero.
    pub fn normalized_metrics(&self) -> BTreeMap<&'static str, f64> {
        let mut metrics: BTreeMap<&'static str, f64> = METRIC_SOURCES
            .iter()
            .filter_map(|(metric, columns)| {
                columns
                    .iter()
                    .find_map(|c| self.stats.get(*c).copied())
                    .map(|value| (*metric, value))
            })
            .collect();
        if let Some(rating) = self.average_rating {
            metrics.insert("average_rating", rating);
        }
        metrics
    }

    /// The category this player is best suited to.
    ///
    /// With several listed categories the one with the highest mean of its
    /// key metrics wins (first listed on ties). Unrecognised positions fall
    /// back to the selected slot, then to central midfield.
    pub fn natural_category(&self) -> PositionCategory {
        let candidates = position_categories(&self.position);
        match candidates.as_slice() {
            [] => category_from_selected(&self.position_selected).unwrap_or(PositionCategory::CM),
            [only] => *only,
            [first, rest @ ..] => {
                let metrics = self.normalized_metrics();
                let mut best = (*first, fit_score(&metrics, *first));
                for category in rest {
                    let score = fit_score(&metrics, *category);
                    if score > best.1 {
                        best = (*category, score);
                    }
                }
                best.0
            }
        }
    }
}

fn fit_score(metrics: &BTreeMap<&'static str, f64>, category: PositionCategory) -> f64 {
    let values: Vec<f64> = category
        .key_metrics()
        .iter()
        .filter_map(|m| metrics.get(m).copied())
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
