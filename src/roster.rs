//! CSV reader for the event-attendee roster.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// `strptime`-style format of the `regdate` column, e.g. `11/12/08 10:47`.
pub const REGDATE_FORMAT: &str = "%m/%d/%y %H:%M";

/// A single attendee record.
///
/// Fields are matched against the symbolized header row, so `first_Name` and
/// `First Name` both land in `first_name`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AttendeeRow {
    /// Taken from the first column, whatever its header.
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    pub zipcode: Option<String>,
    pub regdate: Option<String>,
    #[serde(rename = "homephone")]
    pub phone: Option<String>,
}

/// Converts a raw header into a lowercase symbol-like key.
pub fn header_to_symbol(header: &str) -> String {
    let cleaned: String = header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Streaming reader over a roster CSV with its header row already
/// symbolized.
pub struct Roster<R> {
    reader: csv::Reader<R>,
    headers: StringRecord,
}

impl Roster<File> {
    /// Opens the roster CSV at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open roster '{}'", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to read roster header from '{}'", path.display()))
    }
}

impl<R: Read> Roster<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: StringRecord = reader.headers()?.iter().map(header_to_symbol).collect();
        debug!(headers = ?headers, "Roster headers symbolized");

        Ok(Self { reader, headers })
    }

    /// Iterates the remaining records in file order.
    ///
    /// A record that does not fit the CSV structure yields an error.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<AttendeeRow>> + '_ {
        let headers = &self.headers;
        self.reader.records().map(move |record| {
            let record = record.context("Malformed roster record")?;
            attendee_from_record(&record, headers)
        })
    }
}

fn attendee_from_record(record: &StringRecord, headers: &StringRecord) -> Result<AttendeeRow> {
    let mut row: AttendeeRow = record
        .deserialize(Some(headers))
        .context("Failed to decode roster record")?;
    row.id = record.get(0).unwrap_or_default().to_string();
    Ok(row)
}
