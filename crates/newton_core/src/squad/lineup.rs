//! Best XI selection
//!
//! Greedy, scarcity-first assignment:
//!
//! 1. A slot's scarcity is the number of pool players whose best role is
//!    one of the slot's eligible roles.
//! 2. Slots are filled from the scarcest up; equal scarcity keeps the
//!    formation's declared order.
//! 3. Each slot instance takes the unused player with the highest score in
//!    an eligible role. Ties go to a natural positional fit, then to the
//!    less versatile player (fewer unfilled slots they could still take),
//!    then to pool order.
//!
//! The bench is filled afterwards from the leftovers: per-group minimums
//! first, then the best remaining players up to the bench size.

use super::analysis::PlayerAnalysis;
use super::formation::{Formation, FormationCatalog, FormationSlot};
use super::position::{PositionCategory, PositionGroup};
use super::scoring::{RoleScore, Verdict};
use crate::config::{AnalysisConfig, BenchConfig};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub slot_index: usize,
    pub instance: usize,
    pub position: PositionCategory,
    pub role: String,
    pub player: String,
    /// Index into the pool the lineup was built from.
    pub player_index: usize,
    pub score: f64,
    pub verdict: Verdict,
    pub natural_fit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchPlayer {
    pub player: String,
    pub player_index: usize,
    pub group: PositionGroup,
    pub role: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Gap {
    /// No eligible player was left for this slot instance.
    Slot {
        slot_index: usize,
        instance: usize,
        position: PositionCategory,
    },
    /// Too few leftovers to meet a bench minimum.
    Bench { group: PositionGroup, missing: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationXI {
    pub formation: String,
    /// In slot order.
    pub starters: Vec<Assignment>,
    pub bench: Vec<BenchPlayer>,
    pub gaps: Vec<Gap>,
    pub total_score: f64,
}

impl FormationXI {
    pub fn slot_gaps(&self) -> usize {
        self.gaps
            .iter()
            .filter(|g| matches!(g, Gap::Slot { .. }))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.slot_gaps() == 0
    }
}

/// One slot instance still waiting for a player.
#[derive(Debug, Clone, Copy)]
struct OpenSlot {
    slot_index: usize,
    instance: usize,
}

struct Candidate<'a> {
    index: usize,
    score: &'a RoleScore,
    natural_fit: bool,
    versatility: usize,
}

impl Candidate<'_> {
    /// `Less` means `self` should be picked over `other`.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .score
            .total_cmp(&self.score.score)
            .then_with(|| other.natural_fit.cmp(&self.natural_fit))
            .then_with(|| self.versatility.cmp(&other.versatility))
            .then_with(|| self.index.cmp(&other.index))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineupBuilder {
    bench: BenchConfig,
}

impl LineupBuilder {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            bench: config.bench.clone(),
        }
    }

    pub fn build(&self, formation: &Formation, pool: &[PlayerAnalysis]) -> FormationXI {
        let order = slot_order(formation, pool);
        let mut open: Vec<OpenSlot> = order
            .iter()
            .flat_map(|&slot_index| {
                (0..formation.slots[slot_index].count).map(move |instance| OpenSlot {
                    slot_index,
                    instance,
                })
            })
            .collect();
        open.reverse();

        let mut used = vec![false; pool.len()];
        let mut starters = Vec::new();
        let mut gaps = Vec::new();

        while let Some(current) = open.pop() {
            let slot = &formation.slots[current.slot_index];
            let pick = pool
                .iter()
                .enumerate()
                .filter(|(i, _)| !used[*i])
                .filter_map(|(index, analysis)| {
                    let score = analysis.best_among(&slot.eligible_roles)?;
                    Some(Candidate {
                        index,
                        score,
                        natural_fit: analysis.category == slot.position,
                        versatility: open
                            .iter()
                            .filter(|o| {
                                let roles = &formation.slots[o.slot_index].eligible_roles;
                                analysis.best_among(roles).is_some()
                            })
                            .count(),
                    })
                })
                .min_by(|a, b| a.rank(b));

            match pick {
                Some(candidate) => {
                    used[candidate.index] = true;
                    let analysis = &pool[candidate.index];
                    tracing::debug!(
                        formation = %formation.name,
                        slot = current.slot_index,
                        player = %analysis.player.name,
                        role = %candidate.score.role,
                        score = candidate.score.score,
                        "slot filled"
                    );
                    starters.push(Assignment {
                        slot_index: current.slot_index,
                        instance: current.instance,
                        position: slot.position,
                        role: candidate.score.role.clone(),
                        player: analysis.player.name.clone(),
                        player_index: candidate.index,
                        score: candidate.score.score,
                        verdict: candidate.score.verdict,
                        natural_fit: candidate.natural_fit,
                    });
                }
                None => {
                    tracing::debug!(
                        formation = %formation.name,
                        slot = current.slot_index,
                        "no eligible player left"
                    );
                    gaps.push(Gap::Slot {
                        slot_index: current.slot_index,
                        instance: current.instance,
                        position: slot.position,
                    });
                }
            }
        }

        starters.sort_by_key(|a| (a.slot_index, a.instance));
        gaps.sort_by_key(|g| match g {
            Gap::Slot {
                slot_index,
                instance,
                ..
            } => (*slot_index, *instance),
            Gap::Bench { .. } => (usize::MAX, 0),
        });

        let bench = self.fill_bench(pool, &mut used, &mut gaps);
        let total_score = starters.iter().map(|a| a.score).sum();

        FormationXI {
            formation: formation.name.clone(),
            starters,
            bench,
            gaps,
            total_score,
        }
    }

    fn fill_bench(
        &self,
        pool: &[PlayerAnalysis],
        used: &mut [bool],
        gaps: &mut Vec<Gap>,
    ) -> Vec<BenchPlayer> {
        // leftovers, best score first, pool order on ties
        let mut leftovers: Vec<(usize, &RoleScore)> = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .filter_map(|(i, a)| a.best_role().map(|s| (i, s)))
            .collect();
        leftovers.sort_by(|a, b| b.1.score.total_cmp(&a.1.score).then(a.0.cmp(&b.0)));

        let mut bench = Vec::new();
        let to_bench = |index: usize, score: &RoleScore| BenchPlayer {
            player: pool[index].player.name.clone(),
            player_index: index,
            group: pool[index].category.group(),
            role: score.role.clone(),
            score: score.score,
        };

        for (&group, &minimum) in &self.bench.minimums {
            let mut taken = 0;
            for &(index, score) in &leftovers {
                if taken == minimum || bench.len() == self.bench.size {
                    break;
                }
                if !used[index] && pool[index].category.group() == group {
                    used[index] = true;
                    bench.push(to_bench(index, score));
                    taken += 1;
                }
            }
            if taken < minimum {
                gaps.push(Gap::Bench {
                    group,
                    missing: minimum - taken,
                });
            }
        }

        for &(index, score) in &leftovers {
            if bench.len() == self.bench.size {
                break;
            }
            if !used[index] {
                used[index] = true;
                bench.push(to_bench(index, score));
            }
        }
        bench
    }

    /// Builds every formation and orders them: fewest unfilled slots, then
    /// highest total score, then catalog order.
    pub fn rank_formations(
        &self,
        catalog: &FormationCatalog,
        pool: &[PlayerAnalysis],
        top_n: usize,
    ) -> Vec<FormationXI> {
        let mut built: Vec<FormationXI> = catalog.iter().map(|f| self.build(f, pool)).collect();
        built.sort_by(|a, b| {
            a.slot_gaps()
                .cmp(&b.slot_gaps())
                .then_with(|| b.total_score.total_cmp(&a.total_score))
        });
        built.truncate(top_n);
        built
    }
}

fn slot_order(formation: &Formation, pool: &[PlayerAnalysis]) -> Vec<usize> {
    let scarcity = |slot: &FormationSlot| {
        pool.iter()
            .filter(|a| a.best_role().is_some_and(|best| slot.accepts(&best.role)))
            .count()
    };
    let mut order: Vec<(usize, usize)> = formation
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| (scarcity(slot), i))
        .collect();
    order.sort();
    order.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squad::analysis::SquadEvaluator;
    use crate::squad::player::Player;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn analyse(players: Vec<Player>) -> Vec<PlayerAnalysis> {
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        SquadEvaluator::default().analyze(&players, today).players
    }

    fn squad() -> Vec<Player> {
        vec![
            Player::new("Keeper", "GK")
                .with_stat("xGP", 0.3)
                .with_stat("Con/90", 0.7)
                .with_stat("Int/90", 0.3)
                .with_stat("Pas %", 98.0),
            Player::new("Backup Keeper", "GK"),
            Player::new("Stone", "D (C)")
                .with_stat("Tck/90", 2.5)
                .with_stat("Hdr %", 85.0)
                .with_stat("Clr/90", 1.7)
                .with_stat("Int/90", 3.3)
                .with_stat("Blk/90", 0.8),
            Player::new("Wall", "D (C)").with_stat("Tck/90", 2.5),
            Player::new("Rightback", "D (R)").with_stat("Tck/90", 2.2),
            Player::new("Leftback", "D (L)"),
            Player::new("Anchor", "DM").with_stat("Tck/90", 2.5),
            Player::new("Maestro", "M (C)").with_stat("Pas %", 90.0),
            Player::new("Runner", "M (C)"),
            Player::new("Flyer", "AM (R)").with_stat("Drb/90", 4.5),
            Player::new("Dasher", "AM (L)"),
            Player::new("Poacher", "ST (C)").with_stat("xG", 0.5),
            Player::new("Spare", "D (C)"),
        ]
    }

    fn describe(xi: &FormationXI) -> Vec<String> {
        let mut lines: Vec<String> = xi
            .starters
            .iter()
            .map(|a| format!("{} {}: {} ({:.1})", a.position, a.role, a.player, a.score))
            .collect();
        lines.extend(xi.bench.iter().map(|b| format!("bench {}: {}", b.group, b.player)));
        lines.extend(xi.gaps.iter().map(|g| match g {
            Gap::Slot { position, .. } => format!("gap slot {}", position),
            Gap::Bench { group, missing } => format!("gap bench {} x{}", group, missing),
        }));
        lines
    }

    #[test]
    fn test_best_xi_snapshot() {
        let pool = analyse(squad());
        let catalog = FormationCatalog::standard();
        let xi = LineupBuilder::default().build(catalog.find("433").unwrap(), &pool);

        insta::assert_json_snapshot!(describe(&xi), @r###"
        [
          "GK GK: Keeper (100.0)",
          "CB CB-STOPPER: Stone (100.0)",
          "CB CB-STOPPER: Wall (20.0)",
          "FB FB: Rightback (16.7)",
          "FB FB: Leftback (0.0)",
          "DM MD: Anchor (20.0)",
          "CM MD: Maestro (20.0)",
          "CM MD: Runner (0.0)",
          "W WAP: Flyer (20.0)",
          "W WAP: Dasher (0.0)",
          "ST ST-PROVIDER: Poacher (20.0)",
          "bench Goalkeeper: Backup Keeper",
          "bench Defence: Spare",
          "gap bench Defence x1",
          "gap bench Midfield x2",
          "gap bench Attack x1"
        ]
        "###);
    }

    #[test]
    fn test_single_elite_keeper_takes_gk_slot() {
        let pool = analyse(squad());
        let elite_keepers: Vec<&PlayerAnalysis> = pool
            .iter()
            .filter(|a| {
                a.best_among(&["GK".to_string()])
                    .is_some_and(|s| s.verdict == Verdict::Elite)
            })
            .collect();
        assert_eq!(elite_keepers.len(), 1);

        let catalog = FormationCatalog::standard();
        let xi = LineupBuilder::default().build(catalog.find("4-3-3 DM Wide").unwrap(), &pool);
        let gk = xi.starters.iter().find(|a| a.position == PositionCategory::GK).unwrap();
        assert_eq!(gk.player, "Keeper");
        assert!(gk.natural_fit);
    }

    #[test]
    fn test_missing_keeper_is_slot_gap() {
        let players: Vec<Player> = squad().into_iter().filter(|p| p.position != "GK").collect();
        let pool = analyse(players);
        let catalog = FormationCatalog::standard();
        let xi = LineupBuilder::default().build(catalog.find("433").unwrap(), &pool);

        assert_eq!(xi.starters.len(), 10);
        assert_eq!(xi.slot_gaps(), 1);
        assert!(matches!(
            xi.gaps[0],
            Gap::Slot {
                position: PositionCategory::GK,
                ..
            }
        ));
        assert!(!xi.is_complete());
    }

    #[test]
    fn test_empty_pool() {
        let catalog = FormationCatalog::standard();
        let xi = LineupBuilder::default().build(catalog.find("442").unwrap(), &[]);
        assert!(xi.starters.is_empty());
        assert_eq!(xi.slot_gaps(), 11);
        assert!(xi.bench.is_empty());
        assert_eq!(xi.total_score, 0.0);
    }

    #[test]
    fn test_total_score_is_sum_of_starters() {
        let pool = analyse(squad());
        let catalog = FormationCatalog::standard();
        let xi = LineupBuilder::default().build(catalog.find("433").unwrap(), &pool);
        let sum: f64 = xi.starters.iter().map(|a| a.score).sum();
        assert!((xi.total_score - sum).abs() < 1e-9);
    }

    #[test]
    fn test_bench_size_respected() {
        let mut players = squad();
        for i in 0..12 {
            players.push(Player::new(format!("Extra {}", i), "M (C)"));
        }
        let pool = analyse(players);
        let catalog = FormationCatalog::standard();
        let xi = LineupBuilder::default().build(catalog.find("433").unwrap(), &pool);
        assert_eq!(xi.bench.len(), 7);
    }

    #[test]
    fn test_rank_formations() {
        let pool = analyse(squad());
        let catalog = FormationCatalog::standard();
        let ranked = LineupBuilder::default().rank_formations(&catalog, &pool, 3);
        assert_eq!(ranked.len(), 3);
        for pair in ranked.windows(2) {
            assert!(pair[0].slot_gaps() <= pair[1].slot_gaps());
            if pair[0].slot_gaps() == pair[1].slot_gaps() {
                assert!(pair[0].total_score >= pair[1].total_score);
            }
        }
        // no attacking midfielders and one striker: only these fill every slot
        let complete: HashSet<&str> = ranked.iter().map(|xi| xi.formation.as_str()).collect();
        assert_eq!(complete, HashSet::from(["4-3-3 DM Wide", "5-2-3 DM Wide", "3-4-3"]));
        assert!(ranked.iter().all(FormationXI::is_complete));
    }

    #[test]
    fn test_deterministic() {
        let pool = analyse(squad());
        let catalog = FormationCatalog::standard();
        let builder = LineupBuilder::default();
        for formation in catalog.iter() {
            assert_eq!(builder.build(formation, &pool), builder.build(formation, &pool));
        }
    }

    fn picked(xi: &FormationXI, slot_index: usize) -> &str {
        xi.starters
            .iter()
            .find(|a| a.slot_index == slot_index)
            .map(|a| a.player.as_str())
            .unwrap_or("-")
    }

    #[test]
    fn test_scarce_slot_filled_first() {
        // the holder could play either slot; the playmaker only the central one
        let pool = analyse(vec![
            Player::new("Holder", "DM").with_stat("Tck/90", 2.5).with_stat("Pas %", 90.0),
            Player::new("Playmaker", "M (C)").with_stat("OP-KP/90", 1.5),
        ]);
        let formation = Formation::new(
            "Midfield Pair",
            &[(PositionCategory::CM, 1), (PositionCategory::DM, 1)],
        );
        let xi = LineupBuilder::default().build(&formation, &pool);

        assert_eq!(picked(&xi, 1), "Holder");
        assert_eq!(picked(&xi, 0), "Playmaker");
        assert!(xi.is_complete());
    }

    #[test]
    fn test_equal_scores_prefer_natural_position() {
        let pool = analyse(vec![
            Player::new("Holder", "DM").with_stat("Tck/90", 2.5),
            Player::new("Mid", "M (C)").with_stat("Tck/90", 2.5),
        ]);
        assert_eq!(pool[0].best_role().unwrap().score, pool[1].best_role().unwrap().score);

        let formation = Formation::new("Single Midfield", &[(PositionCategory::CM, 1)]);
        let xi = LineupBuilder::default().build(&formation, &pool);
        assert_eq!(picked(&xi, 0), "Mid");
        assert!(xi.starters[0].natural_fit);
    }

    #[test]
    fn test_equal_scores_prefer_less_versatile() {
        let mut formation = Formation::new(
            "Back Pair",
            &[(PositionCategory::CB, 1), (PositionCategory::FB, 1)],
        );
        formation.slots[0].eligible_roles = vec!["CB-STOPPER".into()];
        formation.slots[1].eligible_roles = vec!["FB".into()];

        let pool = analyse(vec![
            Player::new("Utility", "D (RLC)").with_stat("Tck/90", 2.5),
            Player::new("Stopper", "D (C)").with_stat("Tck/90", 2.5),
            Player::new("Right", "D (R)").with_stat("Pas %", 88.0),
            Player::new("Left", "D (L)").with_stat("Pas %", 88.0),
        ]);
        assert_eq!(pool[0].category, PositionCategory::CB);

        let xi = LineupBuilder::default().build(&formation, &pool);
        assert_eq!(picked(&xi, 0), "Stopper");
        assert_eq!(picked(&xi, 1), "Right");
    }

    #[test]
    fn test_full_tie_falls_back_to_pool_order() {
        let formation = Formation::new("Lone Centre-Back", &[(PositionCategory::CB, 1)]);
        let twin = |name: &str| Player::new(name, "D (C)").with_stat("Tck/90", 2.5);

        let pool = analyse(vec![twin("First"), twin("Second")]);
        let xi = LineupBuilder::default().build(&formation, &pool);
        assert_eq!(picked(&xi, 0), "First");

        let pool = analyse(vec![twin("Second"), twin("First")]);
        let xi = LineupBuilder::default().build(&formation, &pool);
        assert_eq!(picked(&xi, 0), "Second");
    }

    proptest! {
        #[test]
        fn prop_no_player_used_twice(picks in proptest::collection::vec(0usize..8, 0..30)) {
            const POSITIONS: [&str; 8] = ["GK", "D (C)", "D (RL)", "DM", "M (C)", "AM (C)", "AM (RL)", "ST (C)"];
            let players: Vec<Player> = picks
                .iter()
                .enumerate()
                .map(|(i, p)| Player::new(format!("P{}", i), POSITIONS[*p]).with_stat("Pas %", 70.0 + i as f64))
                .collect();
            let pool = analyse(players);
            let catalog = FormationCatalog::standard();
            let builder = LineupBuilder::default();

            for formation in catalog.iter() {
                let xi = builder.build(formation, &pool);
                let mut seen = HashSet::new();
                for index in xi.starters.iter().map(|a| a.player_index).chain(xi.bench.iter().map(|b| b.player_index)) {
                    prop_assert!(seen.insert(index));
                }
                prop_assert!(xi.starters.len() <= pool.len());
                prop_assert_eq!(xi.starters.len() + xi.slot_gaps(), formation.size());
            }
        }
    }
}
