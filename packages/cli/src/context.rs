use std::sync::Arc;

use alma_api_client::{AlmaClient, ClientConfig, FileCredentialStore};
use alma_core::kernel::ClientDeps;
use anyhow::{Context, Result};
use console::{style, Term};
use tracing::debug;

/// Everything a backend command needs.
pub struct AppContext {
    pub deps: ClientDeps,
    pub term: Term,
}

impl AppContext {
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Failed to load configuration")?;
        debug!(path = %config.credentials_path.display(), "Using credentials file");
        let credentials = Arc::new(FileCredentialStore::new(&config.credentials_path));
        let client = AlmaClient::new(&config, credentials.clone())
            .context("Failed to build API client")?;

        Ok(Self {
            deps: ClientDeps::new(Arc::new(client), credentials),
            term: Term::stdout(),
        })
    }

    pub fn print_header(&self, title: &str) {
        println!("{}", style(title).bold().cyan());
    }
}
