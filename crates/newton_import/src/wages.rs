//! League-wide wage exports
//!
//! Expected columns (case-insensitive, any order): Name, Position, Wage,
//! Division. Other columns are ignored. A player's category is the first
//! one listed in their position string.

use anyhow::{bail, Context, Result};
use crate::{decode_record, RowFailure};
use csv::StringRecord;
use newton_core::squad::table::parse_wage;
use newton_core::squad::{position_categories, WageRecord};
use newton_core::{Batch, RowError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const WAGE_COLUMNS: [&str; 4] = ["Name", "Position", "Wage", "Division"];

pub fn read_wage_csv(path: &Path) -> Result<Batch<WageRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open wage CSV: {}", path.display()))?;
    read_wages(file).with_context(|| format!("Failed to read wage CSV: {}", path.display()))
}

/// Rows with a blank or `-` wage are players without a contract and are
/// skipped silently. Rows that cannot be understood become `RowError`s.
pub fn read_wages<R: Read>(reader: R) -> Result<Batch<WageRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Missing header row")?.clone();
    let columns = resolve(&headers)?;

    let mut batch = Batch::default();
    for (idx, result) in reader.byte_records().enumerate() {
        let row = idx + 1;
        let record = match decode_record(result) {
            Ok(record) => record,
            Err(RowFailure::Fatal(err)) => {
                return Err(err).with_context(|| format!("Failed at data row {}", row))
            }
            Err(RowFailure::Row(message)) => {
                batch.errors.push(RowError::new(row, message));
                continue;
            }
        };
        match wage_record(&columns, &record) {
            Ok(Some(wage)) => batch.items.push(wage),
            Ok(None) => {}
            Err(message) => {
                tracing::warn!(row, error = %message, "wage row skipped");
                batch.errors.push(RowError::new(row, message));
            }
        }
    }

    tracing::debug!(
        players = batch.items.len(),
        rejected = batch.errors.len(),
        "wage export read"
    );
    Ok(batch)
}

/// Positions of Name, Position, Wage and Division.
fn resolve(headers: &StringRecord) -> Result<[usize; 4]> {
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let missing: Vec<&str> = WAGE_COLUMNS
        .iter()
        .copied()
        .filter(|c| find(c).is_none())
        .collect();
    if !missing.is_empty() {
        bail!("Missing required columns: {}", missing.join(", "));
    }
    Ok(WAGE_COLUMNS.map(|c| find(c).unwrap_or_default()))
}

fn wage_record(
    columns: &[usize; 4],
    record: &StringRecord,
) -> std::result::Result<Option<WageRecord>, String> {
    let [name, position, wage, division] = columns.map(|i| record.get(i).unwrap_or(""));

    if wage.is_empty() || wage == "-" {
        return Ok(None);
    }
    if name.is_empty() {
        return Err("missing name".to_string());
    }
    if division.is_empty() {
        return Err(format!("{}: missing division", name));
    }
    let category = position_categories(position)
        .first()
        .copied()
        .ok_or_else(|| format!("{}: unknown position '{}'", name, position))?;
    let wage = parse_wage(wage)?;

    Ok(Some(WageRecord {
        division: division.to_string(),
        position: position.to_string(),
        category,
        wage,
    }))
}
