//! Backend URL discovery.
//!
//! Resolution order: explicit base URL, first reachable candidate, fallback
//! URL, [`DEFAULT_BASE_URL`]. The answer is cached until [`BackendResolver::reset`].

use std::time::Duration;

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{ClientError, Result};

/// Timeout of a single `/health` probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct BackendResolver {
    http_client: Client,
    base_url: Option<String>,
    candidates: Vec<String>,
    fallback_url: Option<String>,
    resolved: Mutex<Option<String>>,
}

impl BackendResolver {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            candidates: config.candidates.clone(),
            fallback_url: config.fallback_url.clone(),
            resolved: Mutex::new(None),
        })
    }

    /// Resolver that always answers `url` without probing.
    pub fn fixed(url: impl Into<String>) -> Result<Self> {
        Self::new(&ClientConfig::default().with_base_url(url))
    }

    /// Base URL to send requests to. Probes at most once until reset.
    pub async fn resolve(&self) -> String {
        // held across probing so concurrent callers wait for one answer
        let mut resolved = self.resolved.lock().await;
        if let Some(url) = resolved.as_ref() {
            return url.clone();
        }

        let url = self.discover().await;
        *resolved = Some(url.clone());
        url
    }

    /// Cached answer, if any.
    pub async fn resolved(&self) -> Option<String> {
        self.resolved.lock().await.clone()
    }

    /// Forget the cached answer. The next request probes again.
    pub async fn reset(&self) {
        *self.resolved.lock().await = None;
        debug!("Backend URL cache cleared");
    }

    async fn discover(&self) -> String {
        if let Some(url) = &self.base_url {
            debug!(url = %url, "Using configured backend URL");
            return url.clone();
        }

        for candidate in &self.candidates {
            if self.is_reachable(candidate).await {
                info!(url = %candidate, "Backend reachable");
                return candidate.clone();
            }
        }

        match &self.fallback_url {
            Some(url) => {
                warn!(url = %url, "No backend candidate reachable, using fallback URL");
                url.clone()
            }
            None => {
                warn!(url = DEFAULT_BASE_URL, "No backend candidate reachable, using default URL");
                DEFAULT_BASE_URL.to_string()
            }
        }
    }

    /// Any answer below 500 means something is listening.
    async fn is_reachable(&self, url: &str) -> bool {
        match self.http_client.get(format!("{}/health", url)).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(url = %url, status = %status, "Health probe answered");
                status.as_u16() < 500
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Health probe failed");
                false
            }
        }
    }
}
