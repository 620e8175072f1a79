//! REST client for the ALMA backend
//!
//! Implements [`alma_core::kernel::BaseAlmaApi`] over HTTP. The stored session
//! token is attached to every request except login and organization signup.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use alma_api_client::{AlmaClient, ClientConfig, FileCredentialStore};
//!
//! let config = ClientConfig::from_env()?;
//! let credentials = Arc::new(FileCredentialStore::new(&config.credentials_path));
//! let client = AlmaClient::new(&config, credentials)?;
//!
//! let organization = client.get_organization(OrganizationId::from_raw(1)).await?;
//! ```

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod resolver;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use credentials::FileCredentialStore;
pub use error::{ClientError, Result};
pub use resolver::BackendResolver;

use std::sync::Arc;

use alma_core::domains::auth::models::TOKEN_KEY;
use alma_core::kernel::BaseCredentialStore;
use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Paths sent without a bearer token.
const UNAUTHENTICATED_PATHS: &[&str] = &["/auth/login", "/auth/register-organization"];

/// ALMA backend client.
#[derive(Clone)]
pub struct AlmaClient {
    http_client: Client,
    resolver: Arc<BackendResolver>,
    credentials: Arc<dyn BaseCredentialStore>,
}

impl AlmaClient {
    pub fn new(config: &ClientConfig, credentials: Arc<dyn BaseCredentialStore>) -> Result<Self> {
        let resolver = BackendResolver::new(config)?;
        Self::with_resolver(config, Arc::new(resolver), credentials)
    }

    /// Share a resolver between clients.
    pub fn with_resolver(
        config: &ClientConfig,
        resolver: Arc<BackendResolver>,
        credentials: Arc<dyn BaseCredentialStore>,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            resolver,
            credentials,
        })
    }

    pub fn resolver(&self) -> &BackendResolver {
        &self.resolver
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// `None` sends no body at all.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        self.request(Method::PUT, path, body).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let start = std::time::Instant::now();
        let base_url = self.resolver.resolve().await;

        let mut request = self
            .http_client
            .request(method.clone(), format!("{}{}", base_url, path))
            .header(header::ACCEPT, "application/json");

        if !UNAUTHENTICATED_PATHS.contains(&path) {
            if let Some(token) = self.token().await {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "ALMA request failed");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        debug!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = start.elapsed().as_millis(),
            "ALMA request"
        );

        if !status.is_success() {
            let message = error_message(response).await;
            warn!(status = %status, message = %message, "ALMA API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))?
        };

        serde_json::from_value(unwrap_envelope(value))
            .map_err(|e| ClientError::Parse(format!("Unexpected response for {}: {}", path, e)))
    }

    async fn token(&self) -> Option<String> {
        match self.credentials.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }
}

/// Strip the `{timestamp, status, message, data}` wrapper when present.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.contains_key("data")
                && (map.contains_key("status") || map.contains_key("timestamp")) =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Prefer the body's `message`, then `error`, then the raw text.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text) {
        for key in ["message", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                if !message.trim().is_empty() {
                    return message.clone();
                }
            }
        }
    }

    if !text.trim().is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
