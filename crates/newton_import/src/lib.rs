//! CSV import for newton_core
//!
//! Vacancy sheets → recruiters, squad exports → players, league wage
//! exports → wage records, and a blank vacancy template for new users. Everything here is file plumbing; the
//! calculations live in `newton_core`.

pub mod squad;
pub mod vacancies;
pub mod wages;

pub use squad::{read_squad, read_squad_csv};
pub use vacancies::{read_vacancies, read_vacancy_csv, write_template, write_vacancy_template};
pub use wages::{read_wage_csv, read_wages};

/// Why a CSV record could not be used.
pub(crate) enum RowFailure {
    /// Only this row is lost; report it and keep reading.
    Row(String),
    /// The reader itself failed; nothing after this can be trusted.
    Fatal(csv::Error),
}

/// Decodes one byte record as UTF-8.
pub(crate) fn decode_record(
    result: std::result::Result<csv::ByteRecord, csv::Error>,
) -> std::result::Result<csv::StringRecord, RowFailure> {
    match result {
        Ok(bytes) => csv::StringRecord::from_byte_record(bytes)
            .map_err(|err| RowFailure::Row(format!("invalid UTF-8: {}", err.utf8_error()))),
        Err(err) if err.is_io_error() => Err(RowFailure::Fatal(err)),
        Err(err) => Err(RowFailure::Row(err.to_string())),
    }
}
