//! Recruitment capacity calculator
//!
//! Each open vacancy costs a fraction of one recruiter's capacity; a
//! recruiter's load is the plain sum.
//!
//! ```rust
//! use newton_core::capacity::{vacancy_load, CapacityCalculator, CapacityStatus, RecruitmentStage, RoleDifficulty, Vacancy};
//!
//! let hard = Vacancy::new("Lead", RoleDifficulty::Hard, false, RecruitmentStage::None);
//! assert!((vacancy_load(&hard) - 1.0 / 12.0).abs() < 1e-12);
//! assert_eq!(CapacityCalculator::default().classify(0.9), CapacityStatus::AtCapacity);
//! ```

pub mod calculator;
pub mod input;
pub mod vacancy;

pub use calculator::{
    load_for, vacancy_load, CapacityCalculator, CapacityStatus, Headroom, RecruiterSummary,
    TeamHealth, TeamSummary, VacancyLoad,
};
pub use input::{group_by_recruiter, group_numbered, VacancyRecord, MAX_VACANCY_COUNT};
pub use vacancy::{parse_internal_flag, Recruiter, RecruitmentStage, RoleDifficulty, Vacancy};
