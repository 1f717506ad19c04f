//! CSV report of normalized attendee phone numbers.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::normalize::normalize_phone;
use crate::roster::AttendeeRow;

/// One report line. `phone` is empty when no usable number was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneRecord {
    pub id: String,
    pub first_name: String,
    pub phone: Option<String>,
}

impl From<&AttendeeRow> for PhoneRecord {
    fn from(row: &AttendeeRow) -> Self {
        Self {
            id: row.id.clone(),
            first_name: row.first_name.clone(),
            phone: row.phone.as_deref().and_then(normalize_phone),
        }
    }
}

/// Writes `records` with a header row to `path`, replacing the file.
pub fn write_records<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = records.len(), "Writing CSV report");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Builds and writes the phone report for `rows`. Returns how many rows had a
/// usable number.
pub fn write_phone_report(path: impl AsRef<Path>, rows: &[AttendeeRow]) -> Result<usize> {
    let records: Vec<PhoneRecord> = rows.iter().map(PhoneRecord::from).collect();
    let valid = records.iter().filter(|r| r.phone.is_some()).count();

    write_records(&path, &records)?;
    info!(
        path = %path.as_ref().display(),
        total = records.len(),
        valid,
        "Phone report written"
    );

    Ok(valid)
}
