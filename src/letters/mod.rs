//! Personalized thank-you letters.
//!
//! Each roster row is joined with its officials lookup, rendered through a
//! [`LetterTemplate`] and written to `<output_dir>/thanks_<id>.html`.

pub mod template;

pub use template::LetterTemplate;

use anyhow::{Context, Result, bail, ensure};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::LetterConfig;
use crate::normalize::{normalize_phone, normalize_zip};
use crate::roster::Roster;
use crate::services::officials_api::{OfficialsApi, OfficialsLookup, lookup_officials_by_zip};

/// Counts reported at the end of a letter run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LetterSummary {
    pub written: usize,
    pub officials_unavailable: usize,
}

/// Variables a letter template may reference.
pub const LETTER_VARIABLES: [&str; 3] = ["first_name", "zipcode", "legislators"];

/// Renders one letter.
///
/// The template sees the [`LETTER_VARIABLES`].
pub fn generate_letter(
    template: &LetterTemplate,
    first_name: &str,
    zipcode: &str,
    officials: &OfficialsLookup,
) -> Result<String> {
    let vars = HashMap::from([
        ("first_name", first_name.to_string()),
        ("zipcode", zipcode.to_string()),
        ("legislators", officials.to_string()),
    ]);
    template.render(&vars)
}

/// Path of the letter for attendee `id`.
pub fn letter_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("thanks_{id}.html"))
}

/// Writes `content` to `<output_dir>/thanks_<id>.html`, creating the
/// directory if needed and replacing any earlier letter for the same id.
pub fn write_letter(output_dir: &Path, id: &str, content: &str) -> Result<PathBuf> {
    ensure!(
        !id.contains(['/', '\\']) && id != "." && id != "..",
        "Attendee id '{id}' is not a valid file name component"
    );

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir '{}'", output_dir.display()))?;

    let path = letter_path(output_dir, id);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write letter '{}'", path.display()))?;

    Ok(path)
}

/// Writes a letter for every attendee in the roster, one row at a time.
#[tracing::instrument(skip(config, api), fields(roster = %config.roster_path.display()))]
pub async fn save_letters_from_roster<A: OfficialsApi + ?Sized>(
    config: &LetterConfig,
    api: &A,
) -> Result<LetterSummary> {
    let template = LetterTemplate::load(&config.template_path)?;
    if let Some(unknown) = template
        .variables()
        .find(|name| !LETTER_VARIABLES.contains(name))
    {
        bail!(
            "Template '{}' references unknown variable '{unknown}'",
            config.template_path.display()
        );
    }

    let mut roster = Roster::open(&config.roster_path)?;
    let mut summary = LetterSummary::default();

    for row in roster.rows() {
        let row = row?;
        let zipcode = normalize_zip(row.zipcode.as_deref().unwrap_or_default());

        if let Some(raw) = row.phone.as_deref() {
            if normalize_phone(raw).is_none() {
                debug!(id = %row.id, phone = raw, "No usable phone number");
            }
        }

        let officials = lookup_officials_by_zip(api, &zipcode).await;
        if !officials.is_available() {
            summary.officials_unavailable += 1;
        }

        let letter = generate_letter(&template, &row.first_name, &zipcode, &officials)
            .with_context(|| format!("Failed to render letter for attendee '{}'", row.id))?;
        if row.id.is_empty() {
            warn!(first_name = %row.first_name, "Attendee has a blank id");
        }
        let path = write_letter(&config.output_dir, &row.id, &letter)?;

        debug!(id = %row.id, path = %path.display(), "Letter written");
        summary.written += 1;
    }

    if summary.officials_unavailable > 0 {
        warn!(
            unavailable = summary.officials_unavailable,
            "Some letters carry lookup advice instead of officials"
        );
    }
    info!(
        written = summary.written,
        output_dir = %config.output_dir.display(),
        "Letters saved"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::officials_api::{FIND_OFFICIALS_ADVICE, Official};

    #[test]
    fn test_generate_letter_with_officials() {
        let template =
            LetterTemplate::parse("Dear {{first_name}} ({{zipcode}}): {{legislators}}");
        let officials = OfficialsLookup::Found(vec![
            Official {
                name: "Jane Roe".to_string(),
                ..Default::default()
            },
            Official {
                name: "John Doe".to_string(),
                ..Default::default()
            },
        ]);

        let letter = generate_letter(&template, "Allison", "20010", &officials).unwrap();
        assert_eq!(letter, "Dear Allison (20010): Jane Roe, John Doe");
    }

    #[test]
    fn test_generate_letter_with_advice() {
        let template = LetterTemplate::parse("{{legislators}}");
        let officials = OfficialsLookup::Unavailable(FIND_OFFICIALS_ADVICE.to_string());

        let letter = generate_letter(&template, "A", "00000", &officials).unwrap();
        assert_eq!(letter, FIND_OFFICIALS_ADVICE);
    }

    #[test]
    fn test_write_letter_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("output");

        let path = write_letter(&output_dir, "7", "first").unwrap();
        assert_eq!(path, output_dir.join("thanks_7.html"));

        write_letter(&output_dir, "7", "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_letter_blank_id() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_letter(dir.path(), "", "x").unwrap();
        assert_eq!(path, dir.path().join("thanks_.html"));
    }

    #[test]
    fn test_write_letter_rejects_unsafe_ids() {
        let dir = tempfile::tempdir().unwrap();

        assert!(write_letter(dir.path(), "../escape", "x").is_err());
        assert!(write_letter(dir.path(), "..", "x").is_err());
    }
}
