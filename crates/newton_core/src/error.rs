use serde::Serialize;
use thiserror::Error;

/// Input that breaks a business rule. Never coerced into a default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid role type: '{0}'. Must be Easy, Medium, or Hard")]
    InvalidRoleType(String),

    #[error("Invalid stage: '{0}'")]
    InvalidStage(String),

    #[error("Invalid internal flag: '{0}'. Must be Yes or No")]
    InvalidInternalFlag(String),

    #[error("Invalid vacancy count: '{0}'")]
    InvalidCount(String),

    #[error("Vacancy count cannot be negative: {0}")]
    NegativeCount(i64),

    #[error("Vacancy count {count} exceeds the maximum of {max}")]
    CountTooLarge { count: usize, max: usize },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("{field} is too long ({len} > {max} characters)")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Role {role}: thresholds for {metric} are not ordered (good {good}, ok {ok}, poor {poor})")]
    UnorderedThresholds {
        role: String,
        metric: String,
        good: f64,
        ok: f64,
        poor: f64,
    },

    #[error("{section} cutoffs are not ordered: expected {expected}")]
    UnorderedCutoffs {
        section: &'static str,
        expected: &'static str,
    },

    #[error("Role {role}: weight for {metric} must be positive")]
    NonPositiveWeight { role: String, metric: String },

    #[error("Formation {formation}: unknown role '{role}'")]
    UnknownRole { formation: String, role: String },

    #[error("Unknown formation: {0}")]
    UnknownFormation(String),

    #[error("Unknown position category: '{0}'")]
    UnknownPosition(String),
}

/// Structural problems with an imported table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Unrecognized table layout (no distinguishing column among {0} headers)")]
    UnrecognizedLayout(usize),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: {message}")]
    Row { row: usize, message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid baselines: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// A rejected input row, reported next to the rows that were accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Result of a row-oriented batch: the rows that parsed plus the ones that did not.
///
/// An empty `items` with no `errors` means "nothing to process", which is a
/// success. Whole-batch failures are reported through `Err` by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub errors: Vec<RowError>,
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> Batch<T> {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Batch<U> {
        Batch {
            items: self.items.into_iter().map(f).collect(),
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let err = TableError::MissingColumns(vec!["Name".into(), "Position".into()]);
        assert_eq!(err.to_string(), "Missing required columns: Name, Position");
    }

    #[test]
    fn test_empty_batch_is_clean() {
        let batch: Batch<u32> = Batch::default();
        assert!(batch.is_clean());
        assert!(batch.items.is_empty());
    }

    #[test]
    fn test_core_error_wraps_validation() {
        let err: CoreError = ValidationError::NegativeCount(-2).into();
        assert_eq!(err.to_string(), "Vacancy count cannot be negative: -2");
    }
}
