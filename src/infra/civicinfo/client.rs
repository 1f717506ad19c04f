use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, get_bytes};
use crate::services::officials_api::{Official, OfficialsApi};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Roles the lookup is restricted to.
const LEGISLATOR_ROLES: [&str; 2] = ["legislatorUpperBody", "legislatorLowerBody"];

#[derive(Deserialize)]
struct RepresentativeInfoResponse {
    #[serde(default)]
    officials: Vec<Official>,
}

/// Client for the `representatives` endpoint of the Google Civic
/// Information API, keyed with an API key query parameter.
pub struct CivicInfoClient<C = BasicClient> {
    http: UrlParam<C>,
    base_url: String,
}

impl<C: HttpClient> CivicInfoClient<C> {
    pub fn with_client(inner: C, api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            http: UrlParam::google(inner, api_key),
            base_url: base_url.into(),
        }
    }

    /// Request URL for `zip`, without the API key.
    pub fn request_url(&self, zip: &str) -> Result<reqwest::Url> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = reqwest::Url::parse(&format!("{base}/civicinfo/v2/representatives"))
            .with_context(|| format!("Invalid civic API base URL '{}'", self.base_url))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("address", zip);
            query.append_pair("levels", "country");
            for role in LEGISLATOR_ROLES {
                query.append_pair("roles", role);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> OfficialsApi for CivicInfoClient<C> {
    async fn officials_by_zip(&self, zip: &str) -> Result<Vec<Official>> {
        let url = self.request_url(zip)?;
        let bytes = get_bytes(&self.http, url).await?;
        let officials = decode_officials(&bytes)?;

        debug!(zip, count = officials.len(), "Officials received");
        Ok(officials)
    }
}

/// Decodes a `representatives` response body. A body without an
/// `officials` field decodes to an empty list.
pub fn decode_officials(bytes: &[u8]) -> Result<Vec<Official>> {
    let response: RepresentativeInfoResponse =
        serde_json::from_slice(bytes).context("Failed to parse representatives response")?;
    Ok(response.officials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::officials_api::{
        FIND_OFFICIALS_ADVICE, OfficialsLookup, lookup_officials_by_zip,
    };
    use std::sync::{Arc, Mutex};

    /// Answers every request with a canned status and body, keeping the
    /// URLs it was asked for.
    struct CannedHttp {
        status: u16,
        body: &'static str,
        sent: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl HttpClient for CannedHttp {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.sent.lock().unwrap().push(req.url().to_string());
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    fn canned_client(
        status: u16,
        body: &'static str,
    ) -> (CivicInfoClient<CannedHttp>, Arc<Mutex<Vec<String>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let http = CannedHttp {
            status,
            body,
            sent: Arc::clone(&sent),
        };
        let client =
            CivicInfoClient::with_client(http, "secret".to_string(), "https://civic.example.com");
        (client, sent)
    }

    #[tokio::test]
    async fn test_client_error_status_degrades_to_advice() {
        let (client, sent) = canned_client(400, r#"{"error": {"code": 400}}"#);

        let result = lookup_officials_by_zip(&client, "00803").await;

        assert_eq!(
            result,
            OfficialsLookup::Unavailable(FIND_OFFICIALS_ADVICE.to_string())
        );
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains(
            "address=00803&levels=country&roles=legislatorUpperBody&roles=legislatorLowerBody&key=secret"
        ));
    }

    #[tokio::test]
    async fn test_forbidden_status_degrades_to_advice() {
        let (client, _sent) = canned_client(403, "forbidden");

        let result = lookup_officials_by_zip(&client, "80301").await;
        assert!(!result.is_available());
    }

    #[tokio::test]
    async fn test_undecodable_body_degrades_to_advice() {
        let (client, _sent) = canned_client(200, "<html>not json</html>");

        let result = lookup_officials_by_zip(&client, "80301").await;
        assert_eq!(
            result,
            OfficialsLookup::Unavailable(FIND_OFFICIALS_ADVICE.to_string())
        );
    }

    #[tokio::test]
    async fn test_success_body_is_found() {
        let (client, _sent) = canned_client(
            200,
            r#"{"officials": [{"name": "Jane Roe"}, {"name": "John Doe"}]}"#,
        );

        let result = lookup_officials_by_zip(&client, "80301").await;
        match result {
            OfficialsLookup::Found(officials) => {
                let names: Vec<_> = officials.iter().map(|o| o.name.as_str()).collect();
                assert_eq!(names, vec!["Jane Roe", "John Doe"]);
            }
            other => panic!("expected officials, got {other:?}"),
        }
    }

    #[test]
    fn test_request_url() {
        let client = CivicInfoClient::with_client(
            BasicClient::new(),
            "k".to_string(),
            "https://civic.example.com/",
        );
        let url = client.request_url("00803").unwrap();

        assert_eq!(
            url.as_str(),
            "https://civic.example.com/civicinfo/v2/representatives?address=00803&levels=country&roles=legislatorUpperBody&roles=legislatorLowerBody"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = CivicInfoClient::with_client(BasicClient::new(), "k".to_string(), "not a url");
        assert!(client.request_url("80301").is_err());
    }

    #[test]
    fn test_decode_officials() {
        let body = br#"{
            "normalizedInput": {"zip": "80301"},
            "officials": [
                {"name": "Jane Roe", "party": "Independent", "phones": ["(202) 555-0100"],
                 "urls": ["https://roe.senate.gov"], "photoUrl": "https://example.com/roe.jpg"},
                {"name": "John Doe"}
            ]
        }"#;
        let officials = decode_officials(body).unwrap();

        assert_eq!(officials.len(), 2);
        assert_eq!(officials[0].name, "Jane Roe");
        assert_eq!(officials[0].party.as_deref(), Some("Independent"));
        assert_eq!(officials[0].phones, vec!["(202) 555-0100"]);
        assert_eq!(officials[0].photo_url.as_deref(), Some("https://example.com/roe.jpg"));
        assert!(officials[1].emails.is_empty());
    }

    #[test]
    fn test_decode_missing_officials_is_empty() {
        assert!(decode_officials(br#"{"kind": "civicinfo"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_officials(b"<html>").is_err());
    }
}
