//! Vacancy sheets
//!
//! Expected columns (case-insensitive, any order):
//! - Vacancy Name (blank cells get a generated name)
//! - Recruiter Name
//! - Role Type: Easy / Medium / Hard
//! - Internal?: Yes / No, blank is No
//! - Stage: Sourcing / Screening / Interview / Offer / Pre-Hire Checks, or blank
//! - Count (optional column): identical vacancies the row stands for

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use crate::RowFailure;
use newton_core::capacity::{group_numbered, VacancyRecord};
use newton_core::{Batch, Recruiter, RowError};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Vacancy Name",
    "Recruiter Name",
    "Role Type",
    "Internal?",
    "Stage",
];

const COUNT_COLUMN: &str = "Count";

const TEMPLATE_ROWS: [[&str; 6]; 2] = [
    ["Senior Developer", "John Smith", "Hard", "No", "Screening", "1"],
    ["Marketing Assistant", "Jane Doe", "Easy", "Yes", "Sourcing", "2"],
];

/// Column positions resolved from the header row.
struct Columns {
    vacancy_name: usize,
    recruiter_name: usize,
    role_type: usize,
    internal: usize,
    stage: usize,
    count: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| find(*c).is_none())
            .collect();
        if !missing.is_empty() {
            bail!("Missing required columns: {}", missing.join(", "));
        }

        // every required column was found above
        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            vacancy_name: at("Vacancy Name"),
            recruiter_name: at("Recruiter Name"),
            role_type: at("Role Type"),
            internal: at("Internal?"),
            stage: at("Stage"),
            count: find(COUNT_COLUMN),
        })
    }

    fn record(&self, row: &StringRecord) -> VacancyRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or("").to_string();
        let optional = |idx: usize| row.get(idx).map(str::to_string);

        VacancyRecord {
            vacancy_name: optional(self.vacancy_name),
            recruiter_name: cell(self.recruiter_name),
            role_type: cell(self.role_type),
            internal: optional(self.internal),
            stage: optional(self.stage),
            count: self.count.and_then(optional),
        }
    }
}

/// Reads a vacancy sheet and groups the valid rows by recruiter.
///
/// Bad rows end up in `Batch::errors`; a missing required column or an
/// unreadable file fails the whole call.
pub fn read_vacancy_csv(path: &Path) -> Result<Batch<Recruiter>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open vacancy CSV: {}", path.display()))?;
    read_vacancies(file).with_context(|| format!("Failed to read vacancy CSV: {}", path.display()))
}

pub fn read_vacancies<R: Read>(reader: R) -> Result<Batch<Recruiter>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Missing header row")?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        let row = idx + 1;
        match crate::decode_record(result) {
            Ok(record) => rows.push((row, columns.record(&record))),
            Err(RowFailure::Fatal(err)) => {
                return Err(err).with_context(|| format!("Failed at data row {}", row))
            }
            Err(RowFailure::Row(message)) => {
                tracing::warn!(row, error = %message, "unreadable vacancy row skipped");
                errors.push(RowError::new(row, message));
            }
        }
    }

    tracing::debug!(rows = rows.len(), unreadable = errors.len(), "vacancy sheet read");
    Ok(group_numbered(rows, errors))
}

/// Writes a header row plus two example rows.
pub fn write_vacancy_template(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create template: {}", path.display()))?;
    write_template(file)?;
    tracing::info!(path = %path.display(), "vacancy template written");
    Ok(())
}

pub fn write_template<W: Write>(writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(REQUIRED_COLUMNS.iter().chain(std::iter::once(&COUNT_COLUMN)))?;
    for row in TEMPLATE_ROWS {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
