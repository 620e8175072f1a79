use anyhow::{Context, Result};

use super::LoginResponse;
use crate::common::auth::{Actor, Role};
use crate::kernel::BaseCredentialStore;

pub const TOKEN_KEY: &str = "jwt_token";
pub const EMAIL_KEY: &str = "user_email";
pub const ROLE_KEY: &str = "user_type";
pub const PASSWORD_TEMPORAL_KEY: &str = "password_temporal";

/// Logged-in user as persisted in the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub role: Role,
    pub password_temporal: bool,
}

impl Session {
    /// Read the session back. `None` when no token is stored.
    pub async fn load(store: &dyn BaseCredentialStore) -> Result<Option<Self>> {
        let Some(token) = store.get(TOKEN_KEY).await? else {
            return Ok(None);
        };

        let email = store.get(EMAIL_KEY).await?.unwrap_or_default();
        let role = store
            .get(ROLE_KEY)
            .await?
            .context("Session has a token but no role")?
            .parse::<Role>()
            .context("Stored role is not recognised")?;
        let password_temporal = store.get(PASSWORD_TEMPORAL_KEY).await?.as_deref() == Some("true");

        Ok(Some(Self {
            token,
            email,
            role,
            password_temporal,
        }))
    }

    pub async fn save(&self, store: &dyn BaseCredentialStore) -> Result<()> {
        store.set(TOKEN_KEY, &self.token).await?;
        store.set(EMAIL_KEY, &self.email).await?;
        store.set(ROLE_KEY, self.role.as_str()).await?;
        store
            .set(PASSWORD_TEMPORAL_KEY, &self.password_temporal.to_string())
            .await?;
        Ok(())
    }

    pub async fn clear(store: &dyn BaseCredentialStore) -> Result<()> {
        for key in [TOKEN_KEY, EMAIL_KEY, ROLE_KEY, PASSWORD_TEMPORAL_KEY] {
            store.remove(key).await?;
        }
        Ok(())
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.email.clone(), self.role)
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.access_token,
            email: response.email,
            role: response.role,
            password_temporal: response.password_temporal,
        }
    }
}
