//! Squad export parsing
//!
//! Two export layouts are supported. The layout is detected once from the
//! header row and every data row goes through the matching [`LayoutParser`].

use super::player::Player;
use super::position::StatusFlag;
use crate::error::{Batch, RowError, TableError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column that only the extended export carries.
const EXTENDED_MARKER: &str = "xGP/90";
/// Columns that only the legacy export carries.
const LEGACY_MARKERS: &[&str] = &["xGP", "K Tck/90"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    /// 24 columns, season totals for a few metrics.
    Legacy,
    /// 32 columns, per-90 metrics throughout.
    Extended,
}

impl TableLayout {
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Result<Self, TableError> {
        let has = |name: &str| headers.iter().any(|h| h.as_ref().trim().eq_ignore_ascii_case(name));
        if has(EXTENDED_MARKER) {
            Ok(Self::Extended)
        } else if LEGACY_MARKERS.iter().copied().any(|m| has(m)) {
            Ok(Self::Legacy)
        } else {
            Err(TableError::UnrecognizedLayout(headers.len()))
        }
    }

    pub fn parser(self) -> &'static dyn LayoutParser {
        match self {
            Self::Legacy => &LegacyFormat,
            Self::Extended => &ExtendedFormat,
        }
    }
}

/// One data row keyed by header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based data row number.
    pub row: usize,
    cells: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new<S: AsRef<str>>(row: usize, headers: &[S], values: &[String]) -> Self {
        let cells = headers
            .iter()
            .zip(values)
            .map(|(h, v)| (h.as_ref().trim().to_lowercase(), v.trim().to_string()))
            .collect();
        Self { row, cells }
    }

    /// Cell text, with blanks and `-` treated as absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(&column.to_lowercase())
            .map(String::as_str)
            .filter(|v| !v.is_empty() && *v != "-")
    }

    fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.is_empty())
    }

    fn error(&self, message: impl Into<String>) -> TableError {
        TableError::Row {
            row: self.row,
            message: message.into(),
        }
    }

    fn number(&self, column: &str) -> Result<Option<f64>, TableError> {
        self.get(column)
            .map(|raw| parse_number(raw).map_err(|e| self.error(format!("{}: {}", column, e))))
            .transpose()
    }

    fn whole(&self, column: &str) -> Result<Option<u32>, TableError> {
        match self.number(column)? {
            Some(v) if v < 0.0 => Err(self.error(format!("{}: negative value {}", column, v))),
            Some(v) => Ok(Some(v.round() as u32)),
            None => Ok(None),
        }
    }
}

/// Parser for one export layout.
pub trait LayoutParser: Sync {
    fn layout(&self) -> TableLayout;

    fn required_columns(&self) -> &[&'static str];

    /// Per-90 and percentage columns copied into `Player::stats`.
    fn stat_columns(&self) -> &[&'static str];

    fn parse_row(&self, row: &RawRow) -> Result<Player, TableError> {
        let name = row
            .get("Name")
            .ok_or_else(|| row.error("Name cannot be empty"))?
            .to_string();

        let (appearances, substitute_appearances) = match row.get("Apps") {
            Some(raw) => parse_appearances(raw).map_err(|e| row.error(format!("Apps: {}", e)))?,
            None => (0, 0),
        };
        let wage = row
            .get("Wage")
            .map(|raw| parse_wage(raw).map_err(|e| row.error(format!("Wage: {}", e))))
            .transpose()?;
        let contract_expires = row
            .get("Expires")
            .map(|raw| parse_date(raw).map_err(|e| row.error(format!("Expires: {}", e))))
            .transpose()?;

        let mut stats = BTreeMap::new();
        for column in self.stat_columns() {
            if let Some(value) = row.number(column)? {
                stats.insert((*column).to_string(), value);
            }
        }

        Ok(Player {
            name,
            position_selected: row.get("Position Selected").unwrap_or_default().to_string(),
            position: row.get("Position").unwrap_or_default().to_string(),
            status: row.get("Inf").map(StatusFlag::from_code).unwrap_or_default(),
            age: row.whole("Age")?,
            wage,
            contract_expires,
            appearances,
            substitute_appearances,
            goals: row.whole("Gls")?.unwrap_or(0),
            assists: row.whole("Ast")?.unwrap_or(0),
            minutes: row.whole("Mins")?,
            average_rating: row.number("Av Rat")?,
            stats,
        })
    }
}

pub struct LegacyFormat;

impl LayoutParser for LegacyFormat {
    fn layout(&self) -> TableLayout {
        TableLayout::Legacy
    }

    fn required_columns(&self) -> &[&'static str] {
        &["Name", "Position", "Apps", "Age", "Wage"]
    }

    fn stat_columns(&self) -> &[&'static str] {
        &[
            "Int/90", "xG", "Shot/90", "Ch C/90", "Drb/90", "Blk/90", "K Tck/90", "Hdr %",
            "Tck R", "Pas %", "Con/90", "xGP", "Sv %",
        ]
    }
}

pub struct ExtendedFormat;

impl LayoutParser for ExtendedFormat {
    fn layout(&self) -> TableLayout {
        TableLayout::Extended
    }

    fn required_columns(&self) -> &[&'static str] {
        &["Name", "Position", "Apps", "Age", "Wage", "Mins"]
    }

    fn stat_columns(&self) -> &[&'static str] {
        &[
            "xGP/90", "Con/90", "Tck/90", "ShT/90", "Hdrs W/90", "Sprints/90", "xA/90",
            "NP-xG/90", "OP-KP/90", "Drb/90", "Conv %", "Pr passes/90", "Clr/90", "Pres C/90",
            "OP-Crs C/90", "Itc", "Shts Blckd/90", "Hdr %", "Pas %", "Int/90",
        ]
    }
}

/// Parses a squad export.
///
/// Structural problems (unknown layout, missing columns) fail the whole
/// table. A row that cannot be parsed is reported and skipped.
pub fn parse_table<S: AsRef<str>>(
    headers: &[S],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<Batch<Player>, TableError> {
    parse_numbered(
        headers,
        rows.into_iter()
            .enumerate()
            .map(|(idx, values)| (idx + 1, values)),
        Vec::new(),
    )
}

/// Like [`parse_table`], for rows that keep their own 1-based numbers.
///
/// `errors` are rows the caller already rejected; they are merged into the
/// batch in row order.
pub fn parse_numbered<S: AsRef<str>>(
    headers: &[S],
    rows: impl IntoIterator<Item = (usize, Vec<String>)>,
    errors: Vec<RowError>,
) -> Result<Batch<Player>, TableError> {
    let layout = TableLayout::detect(headers)?;
    let parser = layout.parser();

    let missing: Vec<String> = parser
        .required_columns()
        .iter()
        .filter(|c| !headers.iter().any(|h| h.as_ref().trim().eq_ignore_ascii_case(c)))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TableError::MissingColumns(missing));
    }

    let mut batch = Batch {
        items: Vec::new(),
        errors,
    };
    for (row, values) in rows {
        let raw = RawRow::new(row, headers, &values);
        if raw.is_blank() {
            continue;
        }
        match parser.parse_row(&raw) {
            Ok(player) => batch.items.push(player),
            Err(err) => {
                tracing::warn!(row = raw.row, error = %err, "squad row skipped");
                batch.errors.push(into_row_error(raw.row, err));
            }
        }
    }

    batch.errors.sort_by_key(|e| e.row);

    tracing::info!(
        layout = ?parser.layout(),
        players = batch.items.len(),
        skipped = batch.errors.len(),
        "squad table parsed"
    );
    Ok(batch)
}

fn into_row_error(row: usize, err: TableError) -> RowError {
    match err {
        TableError::Row { row, message } => RowError::new(row, message),
        other => RowError::new(row, other.to_string()),
    }
}

/// `"13 (3)"` is 13 starts and 3 substitute appearances.
pub fn parse_appearances(raw: &str) -> Result<(u32, u32), String> {
    let raw = raw.trim();
    let (starts, subs) = match raw.split_once('(') {
        Some((starts, rest)) => (starts.trim(), rest.trim_end_matches(')').trim()),
        None => (raw, ""),
    };
    let parse = |s: &str| -> Result<u32, String> {
        if s.is_empty() || s == "-" {
            Ok(0)
        } else {
            s.parse::<u32>()
                .map_err(|_| format!("invalid appearances '{}'", raw))
        }
    };
    Ok((parse(starts)?, parse(subs)?))
}

/// `"£29,000 p/w"` is 29000 per week.
pub fn parse_wage(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches("p/w")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| format!("invalid wage '{}'", raw))
}

/// Plain or percentage number; `"66%"` is 66.
pub fn parse_number(raw: &str) -> Result<f64, String> {
    let cleaned = raw.trim().trim_end_matches('%').replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{}'", raw))
}

/// `dd/mm/yyyy`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").map_err(|_| format!("invalid date '{}'", raw))
}
