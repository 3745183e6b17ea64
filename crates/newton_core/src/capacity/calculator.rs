//! Recruiter workload calculation
//!
//! Formula per vacancy: `base(difficulty) × internal_multiplier × stage_multiplier`
//! - Easy 1/30, Medium 1/20, Hard 1/12
//! - Internal roles take a quarter of the time (0.25)
//! - Stage: Sourcing 0.2, Screening 0.4, Interview 0.2, Offer 0.1, Pre-Hire 0.1, None 1.0
//!
//! A recruiter's load is the plain sum of their vacancy loads. Loads above 1.0
//! are overload, not an error.

use super::vacancy::{Recruiter, RecruitmentStage, RoleDifficulty, Vacancy};
use crate::config::CapacityConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const INTERNAL_MULTIPLIER: f64 = 0.25;

/// Guards whole-vacancy counts against `0.1 * 30 = 2.9999…` style drift.
const COUNT_EPSILON: f64 = 1e-9;

pub fn vacancy_load(vacancy: &Vacancy) -> f64 {
    load_for(vacancy.difficulty, vacancy.internal, vacancy.stage)
}

pub fn load_for(difficulty: RoleDifficulty, internal: bool, stage: RecruitmentStage) -> f64 {
    let internal_mult = if internal { INTERNAL_MULTIPLIER } else { 1.0 };
    difficulty.base_load() * internal_mult * stage.multiplier()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityStatus {
    Available,
    NearCapacity,
    AtCapacity,
    Overloaded,
}

impl CapacityStatus {
    pub const ALL: [CapacityStatus; 4] = [
        Self::Available,
        Self::NearCapacity,
        Self::AtCapacity,
        Self::Overloaded,
    ];
}

impl fmt::Display for CapacityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "Available",
            Self::NearCapacity => "Near Capacity",
            Self::AtCapacity => "At Capacity",
            Self::Overloaded => "Overloaded",
        };
        f.write_str(s)
    }
}

/// How many more vacancies fit, or how far over capacity a recruiter is.
/// Counts are fractional; `whole()` floors them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Headroom {
    Remaining { easy: f64, medium: f64, hard: f64 },
    Overload { easy: f64, medium: f64, hard: f64 },
}

impl Headroom {
    pub fn from_load(total_load: f64) -> Self {
        let remaining = 1.0 - total_load;
        let scale = |d: RoleDifficulty| remaining.abs() * d.full_load_count();
        let (easy, medium, hard) = (
            scale(RoleDifficulty::Easy),
            scale(RoleDifficulty::Medium),
            scale(RoleDifficulty::Hard),
        );
        if remaining >= 0.0 {
            Self::Remaining { easy, medium, hard }
        } else {
            Self::Overload { easy, medium, hard }
        }
    }

    pub fn whole(&self) -> (u32, u32, u32) {
        let floor = |x: f64| (x + COUNT_EPSILON).floor().max(0.0) as u32;
        match *self {
            Self::Remaining { easy, medium, hard } | Self::Overload { easy, medium, hard } => {
                (floor(easy), floor(medium), floor(hard))
            }
        }
    }

    pub fn message(&self) -> String {
        let (easy, medium, hard) = self.whole();
        match self {
            Self::Remaining { .. } => format!(
                "Can take {} more easy OR {} more medium OR {} more hard vacancies",
                easy, medium, hard
            ),
            Self::Overload { .. } => format!(
                "Overloaded by {} easy OR {} medium OR {} hard vacancies",
                easy, medium, hard
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancyLoad {
    pub name: String,
    pub difficulty: RoleDifficulty,
    pub internal: bool,
    pub stage: RecruitmentStage,
    pub load: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecruiterSummary {
    pub name: String,
    pub total_load: f64,
    /// Rounded to one decimal for display; `total_load` stays exact.
    pub percentage: f64,
    pub status: CapacityStatus,
    pub headroom: Headroom,
    pub vacancies: Vec<VacancyLoad>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamHealth {
    Critical,
    Warning,
    Underutilized,
    Healthy,
}

impl fmt::Display for TeamHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Critical => "Critical - Team Overloaded",
            Self::Warning => "Warning - High Utilization",
            Self::Underutilized => "Good - Capacity Available",
            Self::Healthy => "Healthy - Balanced Load",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub recruiters: usize,
    pub average_load: f64,
    pub average_percentage: f64,
    pub status_counts: BTreeMap<CapacityStatus, usize>,
    pub health: TeamHealth,
}

/// Stateless capacity calculator. Cheap to build; pass it where needed.
#[derive(Debug, Clone, Default)]
pub struct CapacityCalculator {
    config: CapacityConfig,
}

impl CapacityCalculator {
    pub fn new(config: CapacityConfig) -> Self {
        Self { config }
    }

    /// Boundaries are closed on the lower side: 0.70 is already Near Capacity.
    pub fn classify(&self, load: f64) -> CapacityStatus {
        if load > self.config.overloaded_above {
            CapacityStatus::Overloaded
        } else if load >= self.config.at_capacity {
            CapacityStatus::AtCapacity
        } else if load >= self.config.near_capacity {
            CapacityStatus::NearCapacity
        } else {
            CapacityStatus::Available
        }
    }

    pub fn total_load(&self, recruiter: &Recruiter) -> f64 {
        recruiter.vacancies.iter().map(vacancy_load).sum()
    }

    pub fn summarize(&self, recruiter: &Recruiter) -> RecruiterSummary {
        let vacancies: Vec<VacancyLoad> = recruiter
            .vacancies
            .iter()
            .map(|v| {
                let load = vacancy_load(v);
                VacancyLoad {
                    name: v.name.clone(),
                    difficulty: v.difficulty,
                    internal: v.internal,
                    stage: v.stage,
                    load,
                    percentage: round_to(load * 100.0, 2),
                }
            })
            .collect();

        let total_load: f64 = vacancies.iter().map(|v| v.load).sum();
        let status = self.classify(total_load);

        tracing::debug!(
            recruiter = %recruiter.name,
            vacancies = vacancies.len(),
            total_load,
            %status,
            "recruiter capacity calculated"
        );

        RecruiterSummary {
            name: recruiter.name.clone(),
            total_load,
            percentage: round_to(total_load * 100.0, 1),
            status,
            headroom: Headroom::from_load(total_load),
            vacancies,
        }
    }

    pub fn summarize_all(&self, recruiters: &[Recruiter]) -> Vec<RecruiterSummary> {
        recruiters.iter().map(|r| self.summarize(r)).collect()
    }

    /// Team-level view. `None` only when there are no recruiters at all.
    pub fn team_summary(&self, summaries: &[RecruiterSummary]) -> Option<TeamSummary> {
        if summaries.is_empty() {
            return None;
        }

        let count = summaries.len();
        let average_load = summaries.iter().map(|s| s.total_load).sum::<f64>() / count as f64;
        let average_percentage = round_to(average_load * 100.0, 1);

        let mut status_counts: BTreeMap<CapacityStatus, usize> =
            CapacityStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for summary in summaries {
            *status_counts.entry(summary.status).or_insert(0) += 1;
        }

        let overloaded = status_counts[&CapacityStatus::Overloaded] as f64;
        let busy = overloaded + status_counts[&CapacityStatus::AtCapacity] as f64;
        let n = count as f64;

        let health = if overloaded > n * self.config.critical_overloaded_ratio {
            TeamHealth::Critical
        } else if busy > n * self.config.warning_busy_ratio {
            TeamHealth::Warning
        } else if average_percentage < self.config.underutilized_average_pct {
            TeamHealth::Underutilized
        } else {
            TeamHealth::Healthy
        };

        tracing::info!(recruiters = count, average_percentage, ?health, "team capacity summarized");

        Some(TeamSummary {
            recruiters: count,
            average_load,
            average_percentage,
            status_counts,
            health,
        })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn vacancies(
        n: usize,
        difficulty: RoleDifficulty,
        internal: bool,
        stage: RecruitmentStage,
    ) -> Vec<Vacancy> {
        (0..n)
            .map(|i| Vacancy::new(format!("Vacancy {}", i + 1), difficulty, internal, stage))
            .collect()
    }

    #[test]
    fn test_base_loads() {
        let easy = load_for(RoleDifficulty::Easy, false, RecruitmentStage::None);
        let medium = load_for(RoleDifficulty::Medium, false, RecruitmentStage::None);
        let hard = load_for(RoleDifficulty::Hard, false, RecruitmentStage::None);
        assert!((easy - 1.0 / 30.0).abs() < EPS);
        assert!((medium - 0.05).abs() < EPS);
        assert!((hard - 1.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn test_hard_internal_screening() {
        let load = load_for(RoleDifficulty::Hard, true, RecruitmentStage::Screening);
        assert!((load - (1.0 / 12.0) * 0.25 * 0.4).abs() < EPS);
        assert!((load - 0.008_333_333).abs() < 1e-8);
    }

    #[test]
    fn test_internal_is_quarter_of_external() {
        let external = load_for(RoleDifficulty::Medium, false, RecruitmentStage::Offer);
        let internal = load_for(RoleDifficulty::Medium, true, RecruitmentStage::Offer);
        assert!((internal - external * 0.25).abs() < EPS);
    }

    #[test]
    fn test_status_boundaries() {
        let calc = CapacityCalculator::default();
        assert_eq!(calc.classify(0.0), CapacityStatus::Available);
        assert_eq!(calc.classify(0.699_999), CapacityStatus::Available);
        assert_eq!(calc.classify(0.70), CapacityStatus::NearCapacity);
        assert_eq!(calc.classify(0.899_999), CapacityStatus::NearCapacity);
        assert_eq!(calc.classify(0.90), CapacityStatus::AtCapacity);
        assert_eq!(calc.classify(1.0), CapacityStatus::AtCapacity);
        assert_eq!(calc.classify(1.000_001), CapacityStatus::Overloaded);
    }

    #[test]
    fn test_headroom_inverts() {
        match Headroom::from_load(0.9) {
            Headroom::Remaining { easy, medium, hard } => {
                assert!((easy - 3.0).abs() < 1e-9);
                assert!((medium - 2.0).abs() < 1e-9);
                assert!((hard - 1.2).abs() < 1e-9);
            }
            other => panic!("expected remaining headroom, got {:?}", other),
        }
        assert_eq!(Headroom::from_load(0.9).whole(), (3, 2, 1));
    }

    #[test]
    fn test_headroom_overload() {
        let headroom = Headroom::from_load(1.1);
        assert!(matches!(headroom, Headroom::Overload { .. }));
        assert_eq!(headroom.whole(), (3, 2, 1));
        assert_eq!(
            headroom.message(),
            "Overloaded by 3 easy OR 2 medium OR 1 hard vacancies"
        );
    }

    #[test]
    fn test_john_scenario() {
        let john = Recruiter::new("John")
            .with_vacancies(vacancies(10, RoleDifficulty::Easy, false, RecruitmentStage::None))
            .with_vacancies(vacancies(5, RoleDifficulty::Hard, true, RecruitmentStage::Screening));

        let summary = CapacityCalculator::default().summarize(&john);
        assert!((summary.total_load - 0.375).abs() < 1e-9);
        assert_eq!(summary.percentage, 37.5);
        assert_eq!(summary.status, CapacityStatus::Available);
        assert_eq!(summary.vacancies.len(), 15);
        assert_eq!(summary.vacancies[0].percentage, 3.33);
    }

    #[test]
    fn test_overloaded_recruiter() {
        let busy = Recruiter::new("Ava").with_vacancies(vacancies(
            13,
            RoleDifficulty::Hard,
            false,
            RecruitmentStage::None,
        ));
        let summary = CapacityCalculator::default().summarize(&busy);
        assert_eq!(summary.status, CapacityStatus::Overloaded);
        assert!(matches!(summary.headroom, Headroom::Overload { .. }));
    }

    #[test]
    fn test_empty_recruiter_is_available() {
        let summary = CapacityCalculator::default().summarize(&Recruiter::new("Idle"));
        assert_eq!(summary.total_load, 0.0);
        assert_eq!(summary.status, CapacityStatus::Available);
        assert_eq!(summary.headroom.whole(), (30, 20, 12));
    }

    #[test]
    fn test_team_summary() {
        let calc = CapacityCalculator::default();
        let light = Recruiter::new("A").with_vacancies(vacancies(
            3,
            RoleDifficulty::Easy,
            false,
            RecruitmentStage::None,
        ));
        let heavy = Recruiter::new("B").with_vacancies(vacancies(
            13,
            RoleDifficulty::Hard,
            false,
            RecruitmentStage::None,
        ));
        let summaries = calc.summarize_all(&[light, heavy]);
        let team = calc.team_summary(&summaries).unwrap();

        assert_eq!(team.recruiters, 2);
        assert_eq!(team.status_counts[&CapacityStatus::Available], 1);
        assert_eq!(team.status_counts[&CapacityStatus::Overloaded], 1);
        assert_eq!(team.status_counts[&CapacityStatus::NearCapacity], 0);
        // 1 of 2 overloaded > 30%
        assert_eq!(team.health, TeamHealth::Critical);
    }

    #[test]
    fn test_team_summary_underutilized() {
        let calc = CapacityCalculator::default();
        let summaries = calc.summarize_all(&[Recruiter::new("A"), Recruiter::new("B")]);
        let team = calc.team_summary(&summaries).unwrap();
        assert_eq!(team.health, TeamHealth::Underutilized);
        assert_eq!(team.average_percentage, 0.0);
    }

    #[test]
    fn test_team_summary_empty() {
        assert!(CapacityCalculator::default().team_summary(&[]).is_none());
    }

    fn difficulty_strategy() -> impl Strategy<Value = RoleDifficulty> {
        prop_oneof![
            Just(RoleDifficulty::Easy),
            Just(RoleDifficulty::Medium),
            Just(RoleDifficulty::Hard)
        ]
    }

    fn stage_strategy() -> impl Strategy<Value = RecruitmentStage> {
        prop_oneof![
            Just(RecruitmentStage::Sourcing),
            Just(RecruitmentStage::Screening),
            Just(RecruitmentStage::Interview),
            Just(RecruitmentStage::Offer),
            Just(RecruitmentStage::PreHireChecks),
            Just(RecruitmentStage::None)
        ]
    }

    proptest! {
        #[test]
        fn prop_load_matches_formula(
            difficulty in difficulty_strategy(),
            internal in any::<bool>(),
            stage in stage_strategy(),
        ) {
            let internal_mult = if internal { 0.25 } else { 1.0 };
            let expected = difficulty.base_load() * internal_mult * stage.multiplier();
            prop_assert_eq!(load_for(difficulty, internal, stage), expected);
        }

        #[test]
        fn prop_total_is_sum_of_vacancies(
            rows in prop::collection::vec(
                (difficulty_strategy(), any::<bool>(), stage_strategy()),
                0..60,
            )
        ) {
            let recruiter = Recruiter::new("P").with_vacancies(
                rows.iter().map(|(d, i, s)| Vacancy::new("v", *d, *i, *s)),
            );
            let summary = CapacityCalculator::default().summarize(&recruiter);
            let by_hand: f64 = summary.vacancies.iter().map(|v| v.load).sum();
            prop_assert!((summary.total_load - by_hand).abs() < 1e-12);
            prop_assert_eq!(summary.status, CapacityCalculator::default().classify(summary.total_load));
        }
    }
}
