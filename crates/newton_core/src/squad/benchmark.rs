//! Squad-relative benchmarks
//!
//! Players are compared against the mean of their own position category
//! within the same squad, so 100 always means "squad average for the
//! position".

use super::player::Player;
use super::position::{PositionCategory, StatusFlag};
use super::scoring::Verdict;
use crate::config::BenchmarkConfig;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TOP_METRIC_COUNT: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionBenchmarks {
    means: BTreeMap<PositionCategory, BTreeMap<String, f64>>,
}

impl PositionBenchmarks {
    pub fn from_players(players: &[Player]) -> Self {
        let mut sums: BTreeMap<PositionCategory, BTreeMap<&'static str, (f64, usize)>> =
            BTreeMap::new();

        for player in players {
            let category = player.natural_category();
            let metrics = player.normalized_metrics();
            let entry = sums.entry(category).or_default();
            for metric in category.key_metrics() {
                if let Some(value) = metrics.get(metric) {
                    let slot = entry.entry(*metric).or_insert((0.0, 0));
                    slot.0 += value;
                    slot.1 += 1;
                }
            }
        }

        let means = sums
            .into_iter()
            .map(|(category, metrics)| {
                let averaged: BTreeMap<String, f64> = metrics
                    .into_iter()
                    .map(|(m, (sum, n))| (m.to_string(), sum / n as f64))
                    .collect();
                (category, averaged)
            })
            .collect();
        Self { means }
    }

    pub fn mean(&self, category: PositionCategory, metric: &str) -> Option<f64> {
        self.means.get(&category)?.get(metric).copied()
    }

    /// Value relative to the category mean, per key metric (100 = mean).
    /// Metrics without data or with a non-positive mean are skipped.
    fn relative_scores(
        &self,
        category: PositionCategory,
        metrics: &BTreeMap<&str, f64>,
    ) -> Vec<(&'static str, f64)> {
        category
            .key_metrics()
            .iter()
            .filter_map(|metric| {
                let value = metrics.get(metric)?;
                let mean = self.mean(category, metric).filter(|m| *m > 0.0)?;
                Some((*metric, value / mean * 100.0))
            })
            .collect()
    }

    /// Mean relative score over the category's key metrics; 100 when
    /// nothing can be compared.
    pub fn performance_index(
        &self,
        category: PositionCategory,
        metrics: &BTreeMap<&str, f64>,
    ) -> f64 {
        let scores = self.relative_scores(category, metrics);
        if scores.is_empty() {
            100.0
        } else {
            scores.iter().map(|(_, s)| s).sum::<f64>() / scores.len() as f64
        }
    }

    /// The player's strongest metrics relative to the category mean.
    pub fn top_metrics(
        &self,
        category: PositionCategory,
        metrics: &BTreeMap<&str, f64>,
    ) -> Vec<String> {
        let mut scores = self.relative_scores(category, metrics);
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
            .into_iter()
            .take(TOP_METRIC_COUNT)
            .map(|(m, _)| m.to_string())
            .collect()
    }
}

/// Performance per unit of wage, 100 = squad average value.
pub fn value_score(performance_index: f64, wage: Option<f64>, average_wage: f64) -> f64 {
    match wage {
        Some(wage) if wage > 0.0 && average_wage > 0.0 => {
            let wage_index = wage / average_wage * 100.0;
            performance_index / wage_index * 100.0
        }
        _ => 100.0,
    }
}

/// Mean of the known positive wages, 0 when there are none.
pub fn average_wage(players: &[Player]) -> f64 {
    let wages: Vec<f64> = players
        .iter()
        .filter_map(|p| p.wage)
        .filter(|w| *w > 0.0)
        .collect();
    if wages.is_empty() {
        0.0
    } else {
        wages.iter().sum::<f64>() / wages.len() as f64
    }
}

pub fn performance_verdict(index: f64, config: &BenchmarkConfig) -> Verdict {
    if index >= config.elite_index {
        Verdict::Elite
    } else if index >= config.good_index {
        Verdict::Good
    } else if index >= config.average_index {
        Verdict::Average
    } else {
        Verdict::Poor
    }
}

/// True when the contract runs out within `months` of `today`, or already has.
pub fn contract_warning(expires: Option<NaiveDate>, today: NaiveDate, months: u32) -> bool {
    let Some(expires) = expires else {
        return false;
    };
    match today.checked_add_months(Months::new(months)) {
        Some(limit) => expires <= limit,
        None => true,
    }
}

/// Squad management advice from performance, status and sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    InsufficientData,
    InvestigateListing,
    Promote,
    UseNow,
    AddressTacticalIssue,
    DeployMore,
    LockInStarter,
    ReconsiderTransfer,
    ContinueDevelopment,
    IncreaseMinutes,
    MaintainRole,
    Sell,
    ContinueRotation,
    RotationVeteran,
    SquadRotation,
    SellImmediately,
    Loan,
    ReviewFuture,
    SellUnreliable,
    Declining,
    Underperforming,
    Monitor,
}

impl Advice {
    pub fn for_player(player: &Player, verdict: Verdict, value_score: f64) -> Self {
        if player.appearances <= 5 {
            return Self::InsufficientData;
        }
        let status = player.status;
        let veteran = player.age.is_some_and(|a| a >= 30);
        let sparse = player.appearances < 10;

        match verdict {
            Verdict::Elite => match status {
                StatusFlag::TransferListed => Self::InvestigateListing,
                StatusFlag::U21 => Self::Promote,
                StatusFlag::PreContract => Self::UseNow,
                StatusFlag::Unreliable => Self::AddressTacticalIssue,
                _ if sparse => Self::DeployMore,
                _ => Self::LockInStarter,
            },
            Verdict::Good => match status {
                StatusFlag::TransferListed => Self::ReconsiderTransfer,
                StatusFlag::U21 => Self::ContinueDevelopment,
                _ if sparse => Self::IncreaseMinutes,
                _ => Self::MaintainRole,
            },
            Verdict::Average => match status {
                StatusFlag::TransferListed => Self::Sell,
                StatusFlag::U21 => Self::ContinueRotation,
                _ if veteran => Self::RotationVeteran,
                _ => Self::SquadRotation,
            },
            Verdict::Poor => match status {
                StatusFlag::TransferListed => Self::SellImmediately,
                StatusFlag::U21 if player.age.is_some_and(|a| a <= 21) => Self::Loan,
                StatusFlag::U21 => Self::ReviewFuture,
                StatusFlag::Unreliable => Self::SellUnreliable,
                _ if veteran => Self::Declining,
                _ if value_score < 80.0 => Self::Underperforming,
                _ => Self::Monitor,
            },
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InsufficientData => "USE OR SELL - Insufficient data (low appearances)",
            Self::InvestigateListing => "INVESTIGATE TRANSFER LISTING - Elite metrics suggest retention",
            Self::Promote => "PROMOTE TO SENIOR TEAM - Elite performance at young age",
            Self::UseNow => "USE NOW FOR IMPACT - Elite performer leaving soon",
            Self::AddressTacticalIssue => "ADDRESS TACTICAL ISSUE - Elite metrics despite unreliability",
            Self::DeployMore => "DEPLOY MORE - Elite per-90 metrics from few starts",
            Self::LockInStarter => "LOCK IN STARTER - Elite performance across all metrics",
            Self::ReconsiderTransfer => "Reconsider transfer - Good performance metrics",
            Self::ContinueDevelopment => "Continue development - Good progress for age",
            Self::IncreaseMinutes => "Increase minutes - Good per-90 from few starts",
            Self::MaintainRole => "Maintain current role - Solid contributor",
            Self::Sell => "SELL - Average metrics, listed for transfer",
            Self::ContinueRotation => "Continue rotation - Development ongoing",
            Self::RotationVeteran => "Rotation option - Average veteran",
            Self::SquadRotation => "Squad rotation - Meeting minimum standards",
            Self::SellImmediately => "SELL IMMEDIATELY - Poor metrics, already listed",
            Self::Loan => "Loan or development squad - Needs improvement",
            Self::ReviewFuture => "Review future - Poor performance for age",
            Self::SellUnreliable => "SELL - Poor metrics and unreliable",
            Self::Declining => "DECLINING - Consider replacement",
            Self::Underperforming => "UNDERPERFORMING - Review role or sell",
            Self::Monitor => "Monitor closely - Below expected standards",
        }
    }
}
