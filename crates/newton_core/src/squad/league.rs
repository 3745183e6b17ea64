//! League wage baselines
//!
//! Wage statistics per division and position category, used to judge a
//! player's wage against the whole division instead of their own squad.
//! Baselines are generated from a league-wide wage export and stored as
//! JSON.
//!
//! Lookups fall back in two ways:
//! - an outfield category with fewer than [`MIN_SPECIFIC_PLAYERS`] players
//!   uses the division's aggregated group (Defenders, Midfielders, Attackers);
//! - a division without goalkeeper data gets an estimate from its outfield
//!   averages times the goalkeeper wage multiplier.

use super::benchmark::value_score;
use super::position::{PositionCategory, PositionGroup};
use crate::error::{ConfigError, ValidationError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

/// Sample size needed for a position-specific baseline.
pub const MIN_SPECIFIC_PLAYERS: usize = 30;
/// Sample size needed for an aggregated group baseline.
pub const MIN_AGGREGATED_PLAYERS: usize = 5;
/// Divisions with fewer players are flagged as low sample.
pub const LOW_SAMPLE_PLAYERS: usize = 100;
pub const DEFAULT_GK_WAGE_MULTIPLIER: f64 = 0.75;
/// Gap between league and squad value scores that raises an indicator.
pub const VALUE_GAP: f64 = 30.0;

/// Leagues whose goalkeeper/outfield wage ratio sets the multiplier.
pub const TOP_FIVE_LEAGUES: [&str; 5] = [
    "English Premier Division",
    "Spanish Primera División",
    "Italian Serie A",
    "German Bundesliga",
    "French Ligue 1",
];

const OUTFIELD: [PositionCategory; 7] = [
    PositionCategory::CB,
    PositionCategory::FB,
    PositionCategory::DM,
    PositionCategory::CM,
    PositionCategory::AM,
    PositionCategory::W,
    PositionCategory::ST,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueWageBaseline {
    pub division: String,
    /// Export position string, or the group label for aggregated baselines.
    pub position: String,
    pub position_category: PositionCategory,
    pub average_wage: f64,
    pub median_wage: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    /// 0 marks an estimate.
    pub player_count: usize,
    #[serde(default)]
    pub is_aggregated: bool,
}

impl LeagueWageBaseline {
    pub fn is_estimated(&self) -> bool {
        self.player_count == 0
    }

    /// Approximate percentile (0-100) of `wage` within the baseline.
    ///
    /// Interpolates between zero, the quartiles and twice the upper
    /// quartile, which counts as the top of the range.
    pub fn wage_percentile(&self, wage: f64) -> f64 {
        let points = [
            (0.0, 0.0),
            (self.percentile_25, 25.0),
            (self.median_wage, 50.0),
            (self.percentile_75, 75.0),
            (self.percentile_75 * 2.0, 100.0),
        ];
        if wage <= 0.0 {
            return 0.0;
        }
        for pair in points.windows(2) {
            let ((lo, lo_pct), (hi, hi_pct)) = (pair[0], pair[1]);
            if wage <= hi {
                if hi <= lo {
                    return hi_pct;
                }
                return lo_pct + (wage - lo) / (hi - lo) * (hi_pct - lo_pct);
            }
        }
        100.0
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let ordered = 0.0 <= self.percentile_25
            && self.percentile_25 <= self.median_wage
            && self.median_wage <= self.percentile_75
            && self.average_wage >= 0.0;
        if ordered {
            Ok(())
        } else {
            Err(ValidationError::UnorderedCutoffs {
                section: "league baseline",
                expected: "0 <= percentile_25 <= median_wage <= percentile_75",
            })
        }
    }
}

/// One player's wage from a league-wide export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    pub division: String,
    pub position: String,
    pub category: PositionCategory,
    pub wage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueBaselines {
    pub baselines: Vec<LeagueWageBaseline>,
    pub gk_wage_multiplier: f64,
    /// Total players per division.
    #[serde(default)]
    pub division_metadata: BTreeMap<String, usize>,
}

impl LeagueBaselines {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let baselines: Self = serde_json::from_str(json)?;
        baselines.validate()?;
        Ok(baselines)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let baselines = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            baselines = baselines.baselines.len(),
            divisions = baselines.division_metadata.len(),
            "league baselines loaded"
        );
        Ok(baselines)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.gk_wage_multiplier.is_nan() || self.gk_wage_multiplier <= 0.0 {
            return Err(ValidationError::UnorderedCutoffs {
                section: "league baselines",
                expected: "gk_wage_multiplier > 0",
            });
        }
        self.baselines.iter().try_for_each(LeagueWageBaseline::validate)
    }

    /// Builds baselines from league-wide wages. Records without a positive
    /// wage are ignored.
    pub fn generate(records: &[WageRecord]) -> Self {
        let records: Vec<&WageRecord> = records.iter().filter(|r| r.wage > 0.0).collect();

        let mut grouped: BTreeMap<&str, BTreeMap<PositionCategory, Vec<&WageRecord>>> =
            BTreeMap::new();
        let mut division_metadata = BTreeMap::new();
        for record in records.iter().copied() {
            grouped
                .entry(record.division.as_str())
                .or_default()
                .entry(record.category)
                .or_default()
                .push(record);
            *division_metadata.entry(record.division.clone()).or_insert(0) += 1;
        }

        let mut baselines = Vec::new();
        for (division, categories) in &grouped {
            for (category, players) in categories {
                if players.len() >= MIN_SPECIFIC_PLAYERS {
                    let wages: Vec<f64> = players.iter().map(|p| p.wage).collect();
                    baselines.push(summarize(
                        division,
                        &players[0].position,
                        *category,
                        &wages,
                        false,
                    ));
                }
            }

            for group in [PositionGroup::Defence, PositionGroup::Midfield, PositionGroup::Attack] {
                let wages: Vec<f64> = categories
                    .iter()
                    .filter(|(category, _)| category.group() == group)
                    .flat_map(|(_, players)| players.iter().map(|p| p.wage))
                    .collect();
                let (Some(label), Some(category)) = (group_label(group), representative(group))
                else {
                    continue;
                };
                if wages.len() >= MIN_AGGREGATED_PLAYERS {
                    baselines.push(summarize(division, label, category, &wages, true));
                }
            }
        }

        let gk_wage_multiplier = gk_multiplier(&records);
        tracing::info!(
            players = records.len(),
            baselines = baselines.len(),
            gk_wage_multiplier,
            "league baselines generated"
        );
        Self {
            baselines,
            gk_wage_multiplier,
            division_metadata,
        }
    }

    /// Direct lookup. A position-specific baseline wins over an aggregated
    /// one that uses the same category as its representative.
    pub fn get(&self, division: &str, category: PositionCategory) -> Option<&LeagueWageBaseline> {
        let mut matches = self
            .baselines
            .iter()
            .filter(|b| b.division == division && b.position_category == category);
        let first = matches.next()?;
        if !first.is_aggregated {
            return Some(first);
        }
        matches.find(|b| !b.is_aggregated).or(Some(first))
    }

    /// Specific baseline when it has enough players, otherwise the
    /// aggregated group, otherwise whatever specific baseline exists.
    pub fn with_aggregation(
        &self,
        division: &str,
        category: PositionCategory,
    ) -> Option<&LeagueWageBaseline> {
        let specific = self.get(division, category);
        if specific.is_some_and(|b| !b.is_aggregated && b.player_count >= MIN_SPECIFIC_PLAYERS) {
            return specific;
        }
        let Some(label) = group_label(category.group()) else {
            return specific;
        };
        self.baselines
            .iter()
            .find(|b| b.division == division && b.is_aggregated && b.position == label)
            .or(specific)
    }

    /// Direct lookup, or for goalkeepers an estimate from the division's
    /// outfield averages. Estimates carry `player_count == 0`.
    pub fn with_gk_estimation(
        &self,
        division: &str,
        category: PositionCategory,
    ) -> Option<Cow<'_, LeagueWageBaseline>> {
        if let Some(direct) = self.get(division, category) {
            return Some(Cow::Borrowed(direct));
        }
        if category != PositionCategory::GK {
            return None;
        }

        let outfield: Vec<f64> = OUTFIELD
            .iter()
            .filter_map(|c| self.get(division, *c))
            .map(|b| b.average_wage)
            .collect();
        if outfield.is_empty() {
            return None;
        }
        let estimate = mean(&outfield) * self.gk_wage_multiplier;
        tracing::debug!(division, estimate, "goalkeeper wage estimated");

        Some(Cow::Owned(LeagueWageBaseline {
            division: division.to_string(),
            position: "GK (Estimated)".to_string(),
            position_category: PositionCategory::GK,
            average_wage: estimate,
            median_wage: estimate,
            percentile_25: estimate * 0.6,
            percentile_75: estimate * 1.4,
            player_count: 0,
            is_aggregated: false,
        }))
    }

    /// Baseline used for comparisons: estimation for goalkeepers,
    /// aggregation fallback for everyone else.
    pub fn resolve(
        &self,
        division: &str,
        category: PositionCategory,
    ) -> Option<Cow<'_, LeagueWageBaseline>> {
        if category == PositionCategory::GK {
            self.with_gk_estimation(division, category)
        } else {
            self.with_aggregation(division, category).map(Cow::Borrowed)
        }
    }

    /// Sorted, without duplicates.
    pub fn divisions(&self) -> Vec<&str> {
        let mut divisions: Vec<&str> = self.baselines.iter().map(|b| b.division.as_str()).collect();
        divisions.sort_unstable();
        divisions.dedup();
        divisions
    }

    pub fn division_player_count(&self, division: &str) -> usize {
        self.division_metadata.get(division).copied().unwrap_or(0)
    }

    pub fn is_low_sample(&self, division: &str) -> bool {
        self.division_player_count(division) < LOW_SAMPLE_PLAYERS
    }

    /// Compares one player against the division. `None` without a positive
    /// wage or without a usable baseline.
    pub fn compare(
        &self,
        division: &str,
        category: PositionCategory,
        wage: Option<f64>,
        performance_index: f64,
        squad_value_score: f64,
    ) -> Option<LeagueComparison> {
        let wage = wage.filter(|w| *w > 0.0)?;
        let baseline = self.resolve(division, category)?;
        let league_value = value_score(performance_index, Some(wage), baseline.average_wage);

        Some(LeagueComparison {
            division: division.to_string(),
            baseline_position: baseline.position.clone(),
            aggregated: baseline.is_aggregated,
            estimated: baseline.is_estimated(),
            low_sample: self.is_low_sample(division),
            league_average_wage: baseline.average_wage,
            wage_percentile: baseline.wage_percentile(wage),
            value_score: league_value,
            indicator: ValueIndicator::from_scores(league_value, squad_value_score),
        })
    }
}

/// How the league view of a player's value differs from the squad view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueIndicator {
    /// Cheap for the division even if the squad pays similar wages.
    LeagueBargain,
    /// Looks good value only because the squad's wages are high.
    SquadContext,
}

impl ValueIndicator {
    pub fn from_scores(league_value: f64, squad_value: f64) -> Option<Self> {
        let gap = league_value - squad_value;
        if gap >= VALUE_GAP {
            Some(Self::LeagueBargain)
        } else if gap <= -VALUE_GAP {
            Some(Self::SquadContext)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LeagueBargain => "League Bargain",
            Self::SquadContext => "Squad Context",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueComparison {
    pub division: String,
    /// Position string of the baseline used.
    pub baseline_position: String,
    pub aggregated: bool,
    pub estimated: bool,
    pub low_sample: bool,
    pub league_average_wage: f64,
    pub wage_percentile: f64,
    /// Performance per unit of wage, 100 = division average for the position.
    pub value_score: f64,
    pub indicator: Option<ValueIndicator>,
}

fn group_label(group: PositionGroup) -> Option<&'static str> {
    match group {
        PositionGroup::Goalkeeper => None,
        PositionGroup::Defence => Some("Defenders"),
        PositionGroup::Midfield => Some("Midfielders"),
        PositionGroup::Attack => Some("Attackers"),
    }
}

/// Category an aggregated group is stored under.
fn representative(group: PositionGroup) -> Option<PositionCategory> {
    match group {
        PositionGroup::Goalkeeper => None,
        PositionGroup::Defence => Some(PositionCategory::CB),
        PositionGroup::Midfield => Some(PositionCategory::CM),
        PositionGroup::Attack => Some(PositionCategory::ST),
    }
}

fn gk_multiplier(records: &[&WageRecord]) -> f64 {
    let top: Vec<&&WageRecord> = records
        .iter()
        .filter(|r| TOP_FIVE_LEAGUES.contains(&r.division.as_str()))
        .collect();
    let (keepers, outfield): (Vec<f64>, Vec<f64>) = top.iter().fold(
        (Vec::new(), Vec::new()),
        |(mut keepers, mut outfield), r| {
            if r.category == PositionCategory::GK {
                keepers.push(r.wage);
            } else {
                outfield.push(r.wage);
            }
            (keepers, outfield)
        },
    );
    if keepers.is_empty() || outfield.is_empty() {
        tracing::warn!(
            top_league_players = top.len(),
            "not enough top-league wages, using default goalkeeper multiplier"
        );
        return DEFAULT_GK_WAGE_MULTIPLIER;
    }
    mean(&keepers) / mean(&outfield)
}

fn summarize(
    division: &str,
    position: &str,
    category: PositionCategory,
    wages: &[f64],
    aggregated: bool,
) -> LeagueWageBaseline {
    let mut sorted = wages.to_vec();
    sorted.sort_by(f64::total_cmp);
    let (percentile_25, percentile_75) = if sorted.len() >= 4 {
        let q = quartiles(&sorted);
        (q[0], q[2])
    } else {
        (sorted[0], sorted[sorted.len() - 1])
    };

    LeagueWageBaseline {
        division: division.to_string(),
        position: position.to_string(),
        position_category: category,
        average_wage: mean(&sorted),
        median_wage: median(&sorted),
        percentile_25,
        percentile_75,
        player_count: sorted.len(),
        is_aggregated: aggregated,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Expects sorted, non-empty input.
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Exclusive-method quartile cut points of sorted data with at least two
/// values.
fn quartiles(sorted: &[f64]) -> [f64; 3] {
    let n = sorted.len();
    let m = n + 1;
    let mut cuts = [0.0; 3];
    for (i, cut) in cuts.iter_mut().enumerate() {
        let step = (i + 1) * m;
        let j = (step / 4).clamp(1, n - 1);
        let delta = step as f64 - (j * 4) as f64;
        *cut = (sorted[j - 1] * (4.0 - delta) + sorted[j] * delta) / 4.0;
    }
    cuts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(
        division: &str,
        position: &str,
        category: PositionCategory,
        average: f64,
        players: usize,
        aggregated: bool,
    ) -> LeagueWageBaseline {
        LeagueWageBaseline {
            division: division.to_string(),
            position: position.to_string(),
            position_category: category,
            average_wage: average,
            median_wage: average * 0.8,
            percentile_25: average * 0.5,
            percentile_75: average * 1.2,
            player_count: players,
            is_aggregated: aggregated,
        }
    }

    fn collection(baselines: Vec<LeagueWageBaseline>, meta: &[(&str, usize)]) -> LeagueBaselines {
        LeagueBaselines {
            baselines,
            gk_wage_multiplier: 0.75,
            division_metadata: meta.iter().map(|(d, n)| (d.to_string(), *n)).collect(),
        }
    }

    fn record(division: &str, category: PositionCategory, wage: f64) -> WageRecord {
        WageRecord {
            division: division.to_string(),
            position: category.to_string(),
            category,
            wage,
        }
    }

    #[test]
    fn test_direct_lookup() {
        let st = baseline("Premier", "ST (C)", PositionCategory::ST, 125_000.0, 45, false);
        let leagues = collection(vec![st.clone()], &[("Premier", 523)]);
        assert_eq!(leagues.get("Premier", PositionCategory::ST), Some(&st));
        assert_eq!(leagues.get("Premier", PositionCategory::CM), None);
        assert_eq!(leagues.get("Other", PositionCategory::ST), None);
    }

    #[test]
    fn test_specific_preferred_over_aggregated() {
        let defenders = baseline("Premier", "Defenders", PositionCategory::CB, 80_000.0, 80, true);
        let cb = baseline("Premier", "D (C)", PositionCategory::CB, 90_000.0, 40, false);
        let leagues = collection(vec![defenders, cb.clone()], &[]);
        assert_eq!(leagues.get("Premier", PositionCategory::CB), Some(&cb));
    }

    #[test]
    fn test_small_position_falls_back_to_group() {
        let fb = baseline("Austria", "D (R)", PositionCategory::FB, 10_000.0, 15, false);
        let defenders = baseline("Austria", "Defenders", PositionCategory::CB, 12_000.0, 52, true);
        let leagues = collection(vec![fb.clone(), defenders.clone()], &[("Austria", 87)]);

        assert_eq!(leagues.with_aggregation("Austria", PositionCategory::FB), Some(&defenders));

        // no group baseline: keep the small specific one
        let leagues = collection(vec![fb.clone()], &[]);
        assert_eq!(leagues.with_aggregation("Austria", PositionCategory::FB), Some(&fb));
    }

    #[test]
    fn test_goalkeeper_estimated_from_outfield() {
        let leagues = collection(
            vec![
                baseline("Test", "ST (C)", PositionCategory::ST, 50_000.0, 35, false),
                baseline("Test", "M (C)", PositionCategory::CM, 40_000.0, 40, false),
            ],
            &[("Test", 150)],
        );
        let estimate = leagues.resolve("Test", PositionCategory::GK).unwrap();
        assert!(estimate.is_estimated());
        assert_eq!(estimate.position_category, PositionCategory::GK);
        assert!((estimate.average_wage - 33_750.0).abs() < 1e-9);
        assert!((estimate.percentile_25 - 20_250.0).abs() < 1e-9);

        assert!(leagues.with_gk_estimation("Test", PositionCategory::FB).is_none());
        assert!(leagues.with_gk_estimation("Empty", PositionCategory::GK).is_none());
    }

    #[test]
    fn test_low_sample_and_divisions() {
        let leagues = collection(
            vec![
                baseline("Premier", "ST (C)", PositionCategory::ST, 125_000.0, 45, false),
                baseline("Austria", "ST (C)", PositionCategory::ST, 15_000.0, 25, false),
                baseline("Austria", "M (C)", PositionCategory::CM, 12_000.0, 31, false),
            ],
            &[("Premier", 250), ("Austria", 75)],
        );
        assert_eq!(leagues.divisions(), vec!["Austria", "Premier"]);
        assert!(leagues.is_low_sample("Austria"));
        assert!(!leagues.is_low_sample("Premier"));
        assert!(leagues.is_low_sample("Unknown"));
        assert_eq!(leagues.division_player_count("Austria"), 75);
    }

    #[test]
    fn test_wage_percentile_interpolates_quartiles() {
        let st = LeagueWageBaseline {
            division: "Premier".into(),
            position: "ST (C)".into(),
            position_category: PositionCategory::ST,
            average_wage: 125_000.0,
            median_wage: 85_000.0,
            percentile_25: 45_000.0,
            percentile_75: 180_000.0,
            player_count: 45,
            is_aggregated: false,
        };
        assert_eq!(st.wage_percentile(45_000.0), 25.0);
        assert_eq!(st.wage_percentile(85_000.0), 50.0);
        assert!((st.wage_percentile(65_000.0) - 37.5).abs() < 1e-9);
        assert_eq!(st.wage_percentile(500_000.0), 100.0);
        assert_eq!(st.wage_percentile(0.0), 0.0);
    }

    #[test]
    fn test_bargain_indicator() {
        let leagues = collection(
            vec![baseline("Premier", "ST (C)", PositionCategory::ST, 100_000.0, 45, false)],
            &[("Premier", 523)],
        );
        // paid half the division average at average output
        let cheap = leagues
            .compare("Premier", PositionCategory::ST, Some(50_000.0), 100.0, 100.0)
            .unwrap();
        assert!((cheap.value_score - 200.0).abs() < 1e-9);
        assert_eq!(cheap.indicator, Some(ValueIndicator::LeagueBargain));
        assert!(!cheap.low_sample);

        let dear = leagues
            .compare("Premier", PositionCategory::ST, Some(200_000.0), 100.0, 100.0)
            .unwrap();
        assert_eq!(dear.indicator, Some(ValueIndicator::SquadContext));

        let level = leagues
            .compare("Premier", PositionCategory::ST, Some(100_000.0), 100.0, 110.0)
            .unwrap();
        assert_eq!(level.indicator, None);

        assert!(leagues
            .compare("Premier", PositionCategory::ST, None, 100.0, 100.0)
            .is_none());
        assert!(leagues
            .compare("Premier", PositionCategory::CM, Some(1.0), 100.0, 100.0)
            .is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let leagues = collection(
            vec![baseline("Test", "ST (C)", PositionCategory::ST, 50_000.0, 35, false)],
            &[("Test", 150)],
        );
        let json = leagues.to_json_string().unwrap();
        assert_eq!(LeagueBaselines::from_json_str(&json).unwrap(), leagues);
    }

    #[test]
    fn test_json_with_export_metadata() {
        let json = r#"{
            "version": "1.0",
            "generated_date": "2026-01-10",
            "gk_wage_multiplier": 0.677,
            "baselines": [{
                "division": "Test Division",
                "position": "ST (C)",
                "position_category": "ST",
                "average_wage": 50000.0,
                "median_wage": 40000.0,
                "percentile_25": 25000.0,
                "percentile_75": 60000.0,
                "player_count": 35
            }]
        }"#;
        let leagues = LeagueBaselines::from_json_str(json).unwrap();
        assert_eq!(leagues.gk_wage_multiplier, 0.677);
        assert!(!leagues.baselines[0].is_aggregated);
        assert!(leagues.division_metadata.is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            LeagueBaselines::from_json_str("{\"baselines\": []}"),
            Err(ConfigError::Json(_))
        ));
        let unordered = r#"{"gk_wage_multiplier": 0.7, "baselines": [{
            "division": "X", "position": "GK", "position_category": "GK",
            "average_wage": 10.0, "median_wage": 30.0,
            "percentile_25": 20.0, "percentile_75": 25.0, "player_count": 40}]}"#;
        assert!(matches!(
            LeagueBaselines::from_json_str(unordered),
            Err(ConfigError::Validation(ValidationError::UnorderedCutoffs { .. }))
        ));
    }

    #[test]
    fn test_generate_groups_and_multiplier() {
        let mut records = Vec::new();
        for i in 0..30 {
            records.push(record("English Premier Division", PositionCategory::ST, 100_000.0 + i as f64 * 1_000.0));
        }
        records.push(record("English Premier Division", PositionCategory::GK, 60_000.0));
        records.push(record("Austria", PositionCategory::CB, 10_000.0));
        records.push(record("Austria", PositionCategory::CB, 12_000.0));
        records.push(record("Austria", PositionCategory::FB, 8_000.0));
        records.push(record("Austria", PositionCategory::FB, 9_000.0));
        records.push(record("Austria", PositionCategory::FB, 11_000.0));
        records.push(record("Austria", PositionCategory::ST, 0.0));

        let leagues = LeagueBaselines::generate(&records);

        let st = leagues.get("English Premier Division", PositionCategory::ST).unwrap();
        assert!(!st.is_aggregated);
        assert_eq!(st.player_count, 30);
        assert!((st.average_wage - 114_500.0).abs() < 1e-9);
        assert!((st.median_wage - 114_500.0).abs() < 1e-9);
        assert!(st.percentile_25 < st.median_wage && st.median_wage < st.percentile_75);

        // 30 strikers alone are enough for an Attackers group too
        let attackers = leagues
            .with_aggregation("English Premier Division", PositionCategory::W)
            .unwrap();
        assert_eq!(attackers.position, "Attackers");

        let defenders = leagues.with_aggregation("Austria", PositionCategory::FB).unwrap();
        assert!(defenders.is_aggregated);
        assert_eq!(defenders.player_count, 5);
        assert_eq!(leagues.division_player_count("Austria"), 5);

        assert!((leagues.gk_wage_multiplier - 60_000.0 / 114_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_defaults_without_top_league_keepers() {
        let records = vec![
            record("Other League", PositionCategory::GK, 10_000.0),
            record("Other League", PositionCategory::ST, 15_000.0),
        ];
        assert_eq!(
            LeagueBaselines::generate(&records).gk_wage_multiplier,
            DEFAULT_GK_WAGE_MULTIPLIER
        );
    }

    #[test]
    fn test_quartiles_exclusive_method() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(quartiles(&data), [2.25, 4.5, 6.75]);
        assert_eq!(median(&data), 4.5);
    }
}
