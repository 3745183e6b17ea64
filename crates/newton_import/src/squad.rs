//! Squad exports saved as CSV
//!
//! Only the mechanics live here. Layout detection and row parsing are
//! `newton_core::squad::parse_numbered`'s job.

use anyhow::{Context, Result};
use crate::{decode_record, RowFailure};
use newton_core::squad::parse_numbered;
use newton_core::{Batch, Player, RowError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn read_squad_csv(path: &Path) -> Result<Batch<Player>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open squad CSV: {}", path.display()))?;
    read_squad(file).with_context(|| format!("Failed to read squad CSV: {}", path.display()))
}

pub fn read_squad<R: Read>(reader: R) -> Result<Batch<Player>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("Missing header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        let row = idx + 1;
        match decode_record(result) {
            Ok(record) => rows.push((row, record.iter().map(str::to_string).collect::<Vec<String>>())),
            Err(RowFailure::Fatal(err)) => {
                return Err(err).with_context(|| format!("Failed at data row {}", row))
            }
            Err(RowFailure::Row(message)) => {
                tracing::warn!(row, error = %message, "unreadable squad row skipped");
                errors.push(RowError::new(row, message));
            }
        }
    }

    Ok(parse_numbered(headers.as_slice(), rows, errors)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_export() {
        let data = "Name,Position,Apps,Age,Wage,Mins,xGP/90,Pas %\n\
                    Nico Keep,GK,\"30\",29,\"£12,000 p/w\",2700,0.25,81%\n\
                    ,,,,,,,\n";
        let batch = read_squad(data.as_bytes()).unwrap();
        assert!(batch.is_clean());
        assert_eq!(batch.items.len(), 1);
        let keeper = &batch.items[0];
        assert_eq!(keeper.wage, Some(12000.0));
        assert_eq!(keeper.minutes, Some(2700));
        assert_eq!(keeper.stats["Pas %"], 81.0);
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let mut data = b"Name,Position,Apps,Age,Wage,Mins,xGP/90\n".to_vec();
        data.extend_from_slice(b"Nico Keep,GK,30,29,0,2700,0.25\n");
        data.extend_from_slice(b"Bad \xff Row,GK,3,19,0,270,0.1\n");
        data.extend_from_slice(b"Tom Glove,GK,8,33,0,720,0.05\n");

        let batch = read_squad(data.as_slice()).unwrap();
        let names: Vec<&str> = batch.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Nico Keep", "Tom Glove"]);
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].row, 2);
    }

    #[test]
    fn test_unknown_layout_is_an_error() {
        let data = "Name,Position\nNico,GK\n";
        let err = read_squad(data.as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("Unrecognized table layout"));
    }
}
