//! Run configuration, assembled by the CLI and passed down explicitly.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::infra::civicinfo::client::DEFAULT_BASE_URL;

/// Inputs and output location of a letter run.
#[derive(Debug, Clone)]
pub struct LetterConfig {
    pub roster_path: PathBuf,
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
}

/// Credentials and endpoint of the civic information service.
#[derive(Debug, Clone)]
pub struct CivicApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl CivicApiConfig {
    /// Reads `CIVIC_API_KEY` (required) and `CIVIC_API_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("CIVIC_API_KEY")
            .context("CIVIC_API_KEY must be set (or pass --offline)")?;
        let base_url =
            std::env::var("CIVIC_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }
}
