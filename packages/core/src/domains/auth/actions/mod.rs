//! Auth domain actions - business logic functions

use anyhow::Result;
use tracing::{info, warn};

use crate::common::auth::{Actor, AuthError};
use crate::domains::auth::data::{validate_login, PasswordChange};
use crate::domains::auth::models::{LoginRequest, Session, PASSWORD_TEMPORAL_KEY};
use crate::domains::organization::data::OrganizationSignup;
use crate::kernel::{ClientDeps, SubmitError};

/// Log in and persist the session.
pub async fn login(request: LoginRequest, deps: &ClientDeps) -> Result<Session, SubmitError> {
    validate_login(&request)?;

    info!(email = %request.email, "Logging in");

    let response = deps.api.login(&request).await?;
    let session = Session::from(response);
    store_session(&session, deps).await?;

    info!(email = %session.email, role = %session.role, "Logged in");
    Ok(session)
}

/// Forget the stored session.
pub async fn logout(deps: &ClientDeps) -> Result<()> {
    Session::clear(deps.credentials.as_ref()).await?;
    info!("Logged out");
    Ok(())
}

/// Register an organization together with its admin, then log the admin in.
///
/// Nothing is sent while either part of the form has errors.
pub async fn register_organization(
    signup: OrganizationSignup,
    deps: &ClientDeps,
) -> Result<Session, SubmitError> {
    signup.validate_with(&deps.public_domains)?;

    info!(
        cif = %signup.organizacion.cif,
        admin = %signup.administrador.email,
        "Registering organization"
    );

    let response = deps.api.register_organization(&signup).await?;
    let session = Session::from(response);
    store_session(&session, deps).await?;
    Ok(session)
}

/// Change the logged-in user's password and clear the temporary flag.
pub async fn change_password(form: PasswordChange, deps: &ClientDeps) -> Result<(), SubmitError> {
    let session = current_session(deps)
        .await
        .map_err(|e| SubmitError::Storage(e.to_string()))?
        .ok_or(AuthError::AuthenticationRequired)?;

    form.validate()?;

    info!(email = %session.email, "Changing password");
    deps.api.update_password(&form.to_update()).await?;

    deps.credentials
        .set(PASSWORD_TEMPORAL_KEY, "false")
        .await
        .map_err(|e| SubmitError::Storage(e.to_string()))?;
    Ok(())
}

pub async fn current_session(deps: &ClientDeps) -> Result<Option<Session>> {
    Session::load(deps.credentials.as_ref()).await
}

/// Actor for capability checks, taken from the stored session.
pub async fn current_actor(deps: &ClientDeps) -> Result<Actor, AuthError> {
    match current_session(deps).await {
        Ok(Some(session)) => Ok(session.actor()),
        Ok(None) => Err(AuthError::AuthenticationRequired),
        Err(e) => {
            warn!(error = %e, "Could not read stored session");
            Err(AuthError::AuthenticationRequired)
        }
    }
}

async fn store_session(session: &Session, deps: &ClientDeps) -> Result<(), SubmitError> {
    session
        .save(deps.credentials.as_ref())
        .await
        .map_err(|e| SubmitError::Storage(e.to_string()))
}
