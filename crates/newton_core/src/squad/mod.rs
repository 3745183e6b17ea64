//! Squad evaluation: parsing, role scoring, benchmarks and Best XI

pub mod analysis;
pub mod benchmark;
pub mod formation;
pub mod league;
pub mod lineup;
pub mod player;
pub mod position;
pub mod recommend;
pub mod roles;
pub mod scoring;
pub mod table;

pub use analysis::{PlayerAnalysis, SquadEvaluator, SquadReport};
pub use benchmark::{Advice, PositionBenchmarks};
pub use formation::{Formation, FormationCatalog, FormationSlot};
pub use league::{LeagueBaselines, LeagueComparison, LeagueWageBaseline, ValueIndicator, WageRecord};
pub use lineup::{Assignment, BenchPlayer, FormationXI, Gap, LineupBuilder};
pub use player::Player;
pub use position::{playable_roles, position_categories, PositionCategory, PositionGroup, StatusFlag};
pub use recommend::{ChangeReason, RoleAdvisor, RoleChange};
pub use roles::{MetricDirection, MetricThreshold, RoleCatalog, RoleDefinition};
pub use scoring::{MetricScore, MetricTier, RoleEvaluator, RoleScore, Verdict};
pub use table::{parse_numbered, parse_table, ExtendedFormat, LayoutParser, LegacyFormat, RawRow, TableLayout};
