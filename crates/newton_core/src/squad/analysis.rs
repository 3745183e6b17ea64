//! Whole-squad evaluation

use super::benchmark::{
    average_wage, contract_warning, performance_verdict, value_score, Advice, PositionBenchmarks,
};
use super::formation::FormationCatalog;
use super::league::{LeagueBaselines, LeagueComparison};
use super::player::Player;
use super::position::PositionCategory;
use super::recommend::{RoleAdvisor, RoleChange};
use super::roles::RoleCatalog;
use super::scoring::{RoleEvaluator, RoleScore, Verdict};
use crate::config::AnalysisConfig;
use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAnalysis {
    pub player: Player,
    /// Natural position category.
    pub category: PositionCategory,
    /// Scores for every playable role, best first.
    pub role_scores: Vec<RoleScore>,
    pub recommendations: Vec<RoleChange>,
    pub performance_index: f64,
    pub value_score: f64,
    pub performance_verdict: Verdict,
    pub contract_warning: bool,
    pub top_metrics: Vec<String>,
    pub advice: Advice,
    /// Division comparison; only when a division is selected.
    pub league: Option<LeagueComparison>,
}

impl PlayerAnalysis {
    pub fn best_role(&self) -> Option<&RoleScore> {
        self.role_scores.first()
    }

    /// Best score among the given roles, with the role that earned it.
    pub fn best_among(&self, roles: &[String]) -> Option<&RoleScore> {
        self.role_scores
            .iter()
            .find(|score| roles.iter().any(|r| *r == score.role))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadReport {
    pub players: Vec<PlayerAnalysis>,
    pub benchmarks: PositionBenchmarks,
    pub average_wage: f64,
    /// Player count per role verdict of their best role.
    pub verdict_counts: BTreeMap<Verdict, usize>,
    pub division: Option<String>,
    /// The selected division has too few players for reliable baselines.
    pub low_sample_division: bool,
}

/// Baselines plus the division the squad is compared against.
#[derive(Debug, Clone)]
struct LeagueContext {
    baselines: LeagueBaselines,
    division: String,
}

/// Scores and benchmarks a squad. Holds its own catalogs; nothing global.
#[derive(Debug, Clone)]
pub struct SquadEvaluator {
    roles: RoleCatalog,
    formations: FormationCatalog,
    config: AnalysisConfig,
    league: Option<LeagueContext>,
}

impl Default for SquadEvaluator {
    fn default() -> Self {
        Self {
            roles: RoleCatalog::standard(),
            formations: FormationCatalog::standard(),
            config: AnalysisConfig::default(),
            league: None,
        }
    }
}

impl SquadEvaluator {
    /// Uses the catalogs in `config` when present, the standard ones otherwise.
    pub fn new(config: AnalysisConfig) -> Result<Self, ValidationError> {
        let roles = match &config.roles {
            Some(defs) => RoleCatalog::new(defs.clone())?,
            None => RoleCatalog::standard(),
        };
        let formations = match &config.formations {
            Some(defs) => FormationCatalog::new(defs.clone(), &roles)?,
            None => FormationCatalog::standard(),
        };
        Ok(Self {
            roles,
            formations,
            config,
            league: None,
        })
    }

    /// Compares every player against `division` in `baselines`.
    pub fn with_league(mut self, baselines: LeagueBaselines, division: impl Into<String>) -> Self {
        let division = division.into();
        if !baselines.divisions().contains(&division.as_str()) {
            tracing::warn!(division = %division, "no baselines for division");
        }
        self.league = Some(LeagueContext {
            baselines,
            division,
        });
        self
    }

    pub fn roles(&self) -> &RoleCatalog {
        &self.roles
    }

    pub fn formations(&self) -> &FormationCatalog {
        &self.formations
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// `today` anchors contract warnings so results are reproducible.
    pub fn analyze(&self, players: &[Player], today: NaiveDate) -> SquadReport {
        let evaluator = RoleEvaluator::new(self.config.verdict);
        let advisor = RoleAdvisor::new(&self.roles, self.config.recommendation);
        let benchmarks = PositionBenchmarks::from_players(players);
        let squad_wage = average_wage(players);
        let bench_cfg = &self.config.benchmark;

        let analyses: Vec<PlayerAnalysis> = players
            .iter()
            .map(|player| {
                let category = player.natural_category();
                let metrics = player.normalized_metrics();
                let role_scores = evaluator.evaluate_player(player, &self.roles);
                let recommendations = advisor.suggest(&metrics, &role_scores, category);
                let performance_index = benchmarks.performance_index(category, &metrics);
                let value = value_score(performance_index, player.wage, squad_wage);
                let verdict = performance_verdict(performance_index, bench_cfg);
                let league = self.league.as_ref().and_then(|ctx| {
                    ctx.baselines.compare(
                        &ctx.division,
                        category,
                        player.wage,
                        performance_index,
                        value,
                    )
                });

                PlayerAnalysis {
                    category,
                    recommendations,
                    performance_index,
                    value_score: value,
                    performance_verdict: verdict,
                    contract_warning: contract_warning(
                        player.contract_expires,
                        today,
                        bench_cfg.contract_warning_months,
                    ),
                    top_metrics: benchmarks.top_metrics(category, &metrics),
                    advice: Advice::for_player(player, verdict, value),
                    league,
                    role_scores,
                    player: player.clone(),
                }
            })
            .collect();

        let mut verdict_counts = BTreeMap::new();
        for analysis in &analyses {
            if let Some(best) = analysis.best_role() {
                *verdict_counts.entry(best.verdict).or_insert(0) += 1;
            }
        }

        tracing::info!(
            players = analyses.len(),
            average_wage = squad_wage,
            "squad analysed"
        );

        SquadReport {
            players: analyses,
            benchmarks,
            average_wage: squad_wage,
            verdict_counts,
            division: self.league.as_ref().map(|ctx| ctx.division.clone()),
            low_sample_division: self
                .league
                .as_ref()
                .is_some_and(|ctx| ctx.baselines.is_low_sample(&ctx.division)),
        }
    }
}
