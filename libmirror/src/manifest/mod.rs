//! Remote mirror manifest fetching.
//!
//! The manifest is a plain-text, newline-separated list of image
//! references to mirror (not to be confused with an image manifest in
//! registry terminology). Blank and whitespace-only lines are discarded
//! before use.

use crate::error::{MirrorError, Result};
use std::time::Duration;


/// Configuration for the manifest HTTP client.
///
/// Certificate verification is disabled by default — the original
/// deployment fetches its manifest through relaxed-trust front-ends.
/// This is an explicit, documented flag, not a hidden behavior; pass
/// `with_accept_invalid_certs(false)` to verify normally.
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Accept invalid/self-signed TLS certificates (default: true).
    pub accept_invalid_certs: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            accept_invalid_certs: true,
        }
    }
}

impl ManifestConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets whether invalid TLS certificates are accepted.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// HTTP client for the remote manifest.
#[derive(Debug, Clone)]
pub struct ManifestClient {
    http_client: reqwest::Client,
}

impl ManifestClient {
    /// Creates a client with the given configuration.
    pub fn new(config: ManifestConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| {
                MirrorError::config_with_source("failed to build manifest HTTP client", e)
            })?;
        Ok(Self { http_client })
    }

    /// Fetches the manifest at `url` and returns its non-blank entries.
    ///
    /// Any network or HTTP-status failure is a [`MirrorError::Manifest`];
    /// callers are expected to degrade it to "no entries" and complete
    /// the run as a logged no-op.
    pub async fn fetch(&self, url: &str) -> Result<Vec<String>> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                MirrorError::manifest_with_source(format!("failed to fetch {}", url), e)
            })?
            .error_for_status()
            .map_err(|e| {
                MirrorError::manifest_with_source(format!("{} returned an error status", url), e)
            })?;

        let body = response.text().await.map_err(|e| {
            MirrorError::manifest_with_source(format!("failed to read body of {}", url), e)
        })?;

        Ok(parse_entries(&body))
    }
}

/// Splits a manifest body into entries, discarding blank and
/// whitespace-only lines. Entries are trimmed; their order is preserved.
///
/// # Examples
///
/// ```
/// use libmirror::manifest::parse_entries;
///
/// let body = "docker.io/library/nginx\n\n  \nquay.io/org/app\n";
/// assert_eq!(
///     parse_entries(body),
///     vec!["docker.io/library/nginx", "quay.io/org/app"]
/// );
/// ```
pub fn parse_entries(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
