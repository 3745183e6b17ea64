//! Raw vacancy rows and their validation
//!
//! Rows arrive as strings (spreadsheet cells, form fields). Each row is
//! validated on its own; a bad row is reported and the rest carry on.

use super::vacancy::{parse_internal_flag, Recruiter, RecruitmentStage, RoleDifficulty, Vacancy};
use crate::error::{Batch, RowError, ValidationError};
use serde::{Deserialize, Serialize};
use validator::Validate;

const MAX_NAME_LEN: usize = 100;
/// Upper bound for one row's `Count`.
pub const MAX_VACANCY_COUNT: usize = 1000;

/// One vacancy row as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct VacancyRecord {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub vacancy_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub recruiter_name: String,
    pub role_type: String,
    #[serde(default)]
    pub internal: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    /// Number of identical vacancies this row stands for. Blank means one.
    #[serde(default)]
    pub count: Option<String>,
}

impl VacancyRecord {
    pub fn new(recruiter_name: impl Into<String>, role_type: impl Into<String>) -> Self {
        Self {
            recruiter_name: recruiter_name.into(),
            role_type: role_type.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, vacancy_name: impl Into<String>) -> Self {
        self.vacancy_name = Some(vacancy_name.into());
        self
    }

    pub fn internal(mut self, internal: impl Into<String>) -> Self {
        self.internal = Some(internal.into());
        self
    }

    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }

    fn trimmed(&self) -> Self {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            vacancy_name: clean(&self.vacancy_name),
            recruiter_name: self.recruiter_name.trim().to_string(),
            role_type: self.role_type.trim().to_string(),
            internal: clean(&self.internal),
            stage: clean(&self.stage),
            count: clean(&self.count),
        }
    }

    /// Validates the row and expands it into `count` vacancies.
    ///
    /// `row` is the 1-based row number used for generated vacancy names.
    pub fn validate_into(&self, row: usize) -> Result<(String, Vec<Vacancy>), ValidationError> {
        let record = self.trimmed();
        record.validate().map_err(|errors| {
            if errors.field_errors().contains_key("recruiter_name") {
                length_error("Recruiter name", &record.recruiter_name)
            } else {
                length_error("Vacancy name", record.vacancy_name.as_deref().unwrap_or(""))
            }
        })?;

        if record.role_type.is_empty() {
            return Err(ValidationError::EmptyField { field: "Role type" });
        }
        let difficulty: RoleDifficulty = record.role_type.parse()?;
        let internal = parse_internal_flag(record.internal.as_deref().unwrap_or(""))?;
        let stage: RecruitmentStage = record.stage.as_deref().unwrap_or("").parse()?;
        let count = parse_count(record.count.as_deref())?;

        let base_name = record
            .vacancy_name
            .clone()
            .unwrap_or_else(|| format!("Vacancy {}", row));
        let vacancies = (0..count)
            .map(|i| {
                let name = if count == 1 {
                    base_name.clone()
                } else {
                    format!("{} #{}", base_name, i + 1)
                };
                Vacancy::new(name, difficulty, internal, stage)
            })
            .collect();

        Ok((record.recruiter_name, vacancies))
    }
}

fn length_error(field: &'static str, value: &str) -> ValidationError {
    let len = value.chars().count();
    if len == 0 {
        ValidationError::EmptyField { field }
    } else {
        ValidationError::FieldTooLong {
            field,
            len,
            max: MAX_NAME_LEN,
        }
    }
}

fn parse_count(raw: Option<&str>) -> Result<usize, ValidationError> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| ValidationError::InvalidCount(raw.to_string()))?;
    if value < 0 {
        return Err(ValidationError::NegativeCount(value));
    }
    let count = usize::try_from(value).unwrap_or(usize::MAX);
    if count > MAX_VACANCY_COUNT {
        return Err(ValidationError::CountTooLarge {
            count,
            max: MAX_VACANCY_COUNT,
        });
    }
    Ok(count)
}

/// Groups validated rows by recruiter, keeping first-seen order.
pub fn group_by_recruiter(records: impl IntoIterator<Item = VacancyRecord>) -> Batch<Recruiter> {
    group_numbered(
        records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| (idx + 1, record)),
        Vec::new(),
    )
}

/// Like [`group_by_recruiter`], for callers that already dropped some rows.
///
/// `rows` carry their own 1-based row numbers; `errors` are earlier
/// rejections (unreadable rows, say) merged into the result in row order.
pub fn group_numbered(
    rows: impl IntoIterator<Item = (usize, VacancyRecord)>,
    errors: Vec<RowError>,
) -> Batch<Recruiter> {
    let mut batch: Batch<Recruiter> = Batch {
        items: Vec::new(),
        errors,
    };

    for (row, record) in rows {
        match record.validate_into(row) {
            Ok((name, vacancies)) => {
                match batch.items.iter_mut().find(|r| r.name == name) {
                    Some(recruiter) => recruiter.vacancies.extend(vacancies),
                    None => batch.items.push(Recruiter::new(name).with_vacancies(vacancies)),
                }
            }
            Err(err) => {
                tracing::warn!(row, error = %err, "vacancy row rejected");
                batch.errors.push(RowError::new(row, err.to_string()));
            }
        }
    }

    batch.errors.sort_by_key(|e| e.row);

    tracing::info!(
        recruiters = batch.items.len(),
        rejected = batch.errors.len(),
        "vacancy rows grouped"
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_defaults() {
        let (name, vacancies) = VacancyRecord::new(" John ", "Easy").validate_into(4).unwrap();
        assert_eq!(name, "John");
        assert_eq!(vacancies.len(), 1);
        assert_eq!(vacancies[0].name, "Vacancy 4");
        assert!(!vacancies[0].internal);
        assert_eq!(vacancies[0].stage, RecruitmentStage::None);
    }

    #[test]
    fn test_count_expands_rows() {
        let (_, vacancies) = VacancyRecord::new("John", "hard")
            .named("Engineer")
            .internal("yes")
            .stage("Screening")
            .count("5")
            .validate_into(1)
            .unwrap();
        assert_eq!(vacancies.len(), 5);
        assert_eq!(vacancies[4].name, "Engineer #5");
        assert!(vacancies.iter().all(|v| v.internal));
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = VacancyRecord::new("John", "easy")
            .count("-3")
            .validate_into(1)
            .unwrap_err();
        assert_eq!(err, ValidationError::NegativeCount(-3));
    }

    #[test]
    fn test_huge_count_rejected() {
        let err = VacancyRecord::new("A", "easy")
            .count("9223372036854775807")
            .validate_into(1)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::CountTooLarge {
                count: 9223372036854775807,
                max: MAX_VACANCY_COUNT
            }
        );

        let batch = group_by_recruiter(vec![
            VacancyRecord::new("A", "easy").count("100000000"),
            VacancyRecord::new("A", "easy").count("1000"),
        ]);
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].row, 1);
        assert_eq!(batch.items[0].vacancies.len(), MAX_VACANCY_COUNT);
    }

    #[test]
    fn test_numbered_rows_merge_earlier_errors() {
        let batch = group_numbered(
            vec![
                (1, VacancyRecord::new("A", "easy")),
                (3, VacancyRecord::new("A", "bogus")),
            ],
            vec![RowError::new(2, "unreadable")],
        );
        assert_eq!(batch.items[0].vacancies.len(), 1);
        let rows: Vec<usize> = batch.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, [2, 3]);
    }

    #[test]
    fn test_empty_recruiter_rejected() {
        let err = VacancyRecord::new("   ", "easy").validate_into(1).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "Recruiter name" });
    }

    #[test]
    fn test_long_name_rejected() {
        let err = VacancyRecord::new("x".repeat(101), "easy")
            .validate_into(1)
            .unwrap_err();
        assert!(matches!(err, ValidationError::FieldTooLong { len: 101, .. }));
    }

    #[test]
    fn test_bad_enum_values_rejected() {
        assert!(matches!(
            VacancyRecord::new("A", "tricky").validate_into(1),
            Err(ValidationError::InvalidRoleType(_))
        ));
        assert!(matches!(
            VacancyRecord::new("A", "easy").stage("hired").validate_into(1),
            Err(ValidationError::InvalidStage(_))
        ));
        assert!(matches!(
            VacancyRecord::new("A", "easy").internal("sometimes").validate_into(1),
            Err(ValidationError::InvalidInternalFlag(_))
        ));
        assert!(matches!(
            VacancyRecord::new("A", "").validate_into(1),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn test_grouping_keeps_order_and_reports_errors() {
        let batch = group_by_recruiter(vec![
            VacancyRecord::new("Bea", "easy"),
            VacancyRecord::new("Al", "medium"),
            VacancyRecord::new("Bea", "unknown"),
            VacancyRecord::new("Bea", "hard"),
        ]);
        let names: Vec<&str> = batch.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bea", "Al"]);
        assert_eq!(batch.items[0].vacancy_count(), 2);
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].row, 3);
    }

    #[test]
    fn test_no_rows_is_empty_success() {
        let batch = group_by_recruiter(Vec::new());
        assert!(batch.items.is_empty());
        assert!(batch.is_clean());
    }
}
