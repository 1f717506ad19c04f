//! Trait and types for looking up elected officials by zip code.

use std::fmt;

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

/// Advice printed in place of the officials when the lookup fails.
pub const FIND_OFFICIALS_ADVICE: &str = "You can find your representatives by visiting \
     www.commoncause.org/take-action/find-elected-officials";

/// An elected official as returned by the lookup service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Official {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Outcome of an officials lookup.
///
/// A failed lookup is not an error for the letter run; it degrades into
/// [`OfficialsLookup::Unavailable`] carrying advice for the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficialsLookup {
    Found(Vec<Official>),
    Unavailable(String),
}

impl OfficialsLookup {
    pub fn is_available(&self) -> bool {
        matches!(self, OfficialsLookup::Found(_))
    }
}

/// Official names joined with `", "`, or the advice text.
impl fmt::Display for OfficialsLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfficialsLookup::Found(officials) => {
                let names: Vec<&str> = officials.iter().map(|o| o.name.as_str()).collect();
                f.write_str(&names.join(", "))
            }
            OfficialsLookup::Unavailable(advice) => f.write_str(advice),
        }
    }
}

/// Abstraction over an officials provider (e.g., Google Civic Information).
#[async_trait::async_trait]
pub trait OfficialsApi: Send + Sync {
    /// Returns the upper and lower legislative body members for `zip`.
    async fn officials_by_zip(&self, zip: &str) -> Result<Vec<Official>>;
}

/// Provider used for offline runs. Every lookup fails, so every letter gets
/// the advice text.
pub struct UnavailableOfficials;

#[async_trait::async_trait]
impl OfficialsApi for UnavailableOfficials {
    async fn officials_by_zip(&self, _zip: &str) -> Result<Vec<Official>> {
        Err(anyhow::anyhow!("officials lookup disabled"))
    }
}

/// Looks up officials for `zip`, downgrading any failure to
/// [`OfficialsLookup::Unavailable`].
#[tracing::instrument(skip(api))]
pub async fn lookup_officials_by_zip<A: OfficialsApi + ?Sized>(api: &A, zip: &str) -> OfficialsLookup {
    match api.officials_by_zip(zip).await {
        Ok(officials) => OfficialsLookup::Found(officials),
        Err(e) => {
            warn!(error = %e, "Officials lookup failed, falling back to advice");
            OfficialsLookup::Unavailable(FIND_OFFICIALS_ADVICE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedOfficials(Vec<Official>);

    #[async_trait::async_trait]
    impl OfficialsApi for FixedOfficials {
        async fn officials_by_zip(&self, _zip: &str) -> Result<Vec<Official>> {
            Ok(self.0.clone())
        }
    }

    fn official(name: &str) -> Official {
        Official {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let api = FixedOfficials(vec![official("Jane Roe"), official("John Doe")]);
        let result = lookup_officials_by_zip(&api, "80301").await;

        assert!(result.is_available());
        assert_eq!(result.to_string(), "Jane Roe, John Doe");
    }

    #[tokio::test]
    async fn test_lookup_failure_becomes_advice() {
        let result = lookup_officials_by_zip(&UnavailableOfficials, "80301").await;

        assert_eq!(
            result,
            OfficialsLookup::Unavailable(FIND_OFFICIALS_ADVICE.to_string())
        );
        assert!(result.to_string().contains("commoncause.org"));
    }

    #[test]
    fn test_empty_found_renders_empty() {
        assert_eq!(OfficialsLookup::Found(vec![]).to_string(), "");
    }
}
