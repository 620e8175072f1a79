use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use url::Url;

/// Used when no candidate answers and no fallback is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Timeout of ordinary API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Skips probing when set.
    pub base_url: Option<String>,
    /// Probed in order.
    pub candidates: Vec<String>,
    pub fallback_url: Option<String>,
    pub timeout: Duration,
    pub credentials_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            candidates: Vec::new(),
            fallback_url: None,
            timeout: DEFAULT_TIMEOUT,
            credentials_path: default_credentials_path(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = get("ALMA_API_BASE_URL")
            .map(|url| normalize_url(&url))
            .transpose()
            .context("ALMA_API_BASE_URL must be a valid URL")?;

        let candidates = get("ALMA_API_CANDIDATES")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(normalize_url)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()
            .context("ALMA_API_CANDIDATES must be a comma-separated list of URLs")?
            .unwrap_or_default();

        let fallback_url = get("ALMA_API_FALLBACK_URL")
            .map(|url| normalize_url(&url))
            .transpose()
            .context("ALMA_API_FALLBACK_URL must be a valid URL")?;

        let timeout = match get("ALMA_API_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("ALMA_API_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        let credentials_path = get("ALMA_CREDENTIALS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_credentials_path);

        Ok(Self {
            base_url,
            candidates,
            fallback_url,
            timeout,
            credentials_path,
        })
    }

    /// Configuration pinned to one backend.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

/// Checks the URL parses and drops the trailing slash so paths can be appended.
pub fn normalize_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("Invalid URL: {}", raw))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("Unsupported URL scheme: {}", parsed.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn default_credentials_path() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".alma")
        .join("credentials.json")
}
