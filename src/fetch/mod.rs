mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;

/// GETs `url` and returns the body, failing on any non-success status.
pub async fn get_bytes<C: HttpClient + ?Sized>(client: &C, url: reqwest::Url) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send request: {}", e))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("API returned status {}: {}", status, body));
    }

    Ok(resp.bytes().await?.to_vec())
}
