//! Client dependencies for domain actions (using traits for testability)

use std::sync::Arc;

use crate::domains::validation::PublicDomains;
use crate::kernel::{BaseAlmaApi, BaseCredentialStore};

/// Dependencies accessible to actions
#[derive(Clone)]
pub struct ClientDeps {
    pub api: Arc<dyn BaseAlmaApi>,
    pub credentials: Arc<dyn BaseCredentialStore>,
    /// Deny-list for the corporate email check
    pub public_domains: PublicDomains,
}

impl ClientDeps {
    pub fn new(api: Arc<dyn BaseAlmaApi>, credentials: Arc<dyn BaseCredentialStore>) -> Self {
        Self {
            api,
            credentials,
            public_domains: PublicDomains::default(),
        }
    }

    pub fn with_public_domains(mut self, public_domains: PublicDomains) -> Self {
        self.public_domains = public_domains;
        self
    }
}
