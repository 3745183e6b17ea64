//! # newton_core - Recruitment capacity and squad evaluation
//!
//! Two deterministic calculators sharing one error and config layer:
//!
//! - [`capacity`]: recruiter workload from open vacancies, with status
//!   bands, headroom and team health.
//! - [`squad`]: squad exports parsed into players, scored against role
//!   profiles, benchmarked within the squad, and arranged into a Best XI
//!   per formation.
//!
//! Everything is synchronous and free of global state. Catalogs and
//! evaluators are plain values.
//!
//! ```rust
//! use newton_core::capacity::{CapacityCalculator, Recruiter, RecruitmentStage, RoleDifficulty, Vacancy};
//!
//! let recruiter = Recruiter::new("John").with_vacancies(
//!     (0..10).map(|i| Vacancy::new(format!("Role {}", i), RoleDifficulty::Easy, false, RecruitmentStage::None)),
//! );
//! let summary = CapacityCalculator::default().summarize(&recruiter);
//! assert!((summary.total_load - 1.0 / 3.0).abs() < 1e-9);
//! ```

pub mod capacity;
pub mod config;
pub mod error;
pub mod squad;

pub use capacity::{CapacityCalculator, CapacityStatus, Recruiter, RecruiterSummary, TeamSummary, Vacancy};
pub use config::AnalysisConfig;
pub use error::{Batch, ConfigError, CoreError, Result, RowError, TableError, ValidationError};
pub use squad::{FormationCatalog, FormationXI, LeagueBaselines, LineupBuilder, Player, RoleCatalog, SquadEvaluator, SquadReport};
