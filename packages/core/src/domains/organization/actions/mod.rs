//! Organization domain actions - business logic functions
//!
//! Capability checks here mirror the backend's. They save a round trip, the
//! backend still decides.

use tracing::{debug, info};

use crate::common::auth::Capability;
use crate::common::OrganizationId;
use crate::domains::auth::actions::current_actor;
use crate::domains::organization::data::{OrganizationRegistration, StateChangeRequest};
use crate::domains::organization::errors::LifecycleError;
use crate::domains::organization::machines::OrganizationLifecycle;
use crate::domains::organization::models::{AuditRecord, Organization, OrganizationStatus};
use crate::kernel::{ApiError, ClientDeps, SubmitError};

/// Page size used when no limit is given for the recent audit log.
pub const DEFAULT_AUDIT_LIMIT: u32 = 50;

/// Move an organization to `target`, recording `reason` in the audit log.
///
/// Checks run in order: blank reason, transition table, capability. Only then
/// is the backend called. Backend errors are returned unchanged. A success
/// response whose `estado` is not `target` is an error.
///
/// Each call is one attempt. Repeated calls produce repeated audit records.
pub async fn request_state_change(
    organization: &Organization,
    target: OrganizationStatus,
    reason: &str,
    observations: Option<&str>,
    deps: &ClientDeps,
) -> Result<Organization, LifecycleError> {
    let transition = OrganizationLifecycle::decide(organization.estado, target, reason)?;

    let actor = current_actor(deps).await?;
    actor.can(Capability::ChangeOrganizationState).check()?;

    let mut request = StateChangeRequest::new(target, reason);
    if let Some(observations) = observations {
        request = request.with_observations(observations);
    }

    info!(
        organization_id = %organization.id,
        from = %transition.from,
        to = %transition.to,
        action = %transition.action,
        reason = %request.motivo,
        requested_by = %actor.email(),
        "Requesting organization state change"
    );

    let updated = deps
        .api
        .change_organization_state(organization.id, &request)
        .await?;
    OrganizationLifecycle::confirm(&transition, &updated)?;

    info!(organization_id = %updated.id, estado = %updated.estado, "Organization state changed");
    Ok(updated)
}

/// Same as [`request_state_change`], fetching the organization first.
pub async fn request_state_change_by_id(
    organization_id: OrganizationId,
    target: OrganizationStatus,
    reason: &str,
    observations: Option<&str>,
    deps: &ClientDeps,
) -> Result<Organization, LifecycleError> {
    if reason.trim().is_empty() {
        return Err(LifecycleError::MissingReason);
    }
    let organization = get_organization(organization_id, deps).await?;
    request_state_change(&organization, target, reason, observations, deps).await
}

pub async fn get_organization(
    organization_id: OrganizationId,
    deps: &ClientDeps,
) -> Result<Organization, ApiError> {
    debug!(organization_id = %organization_id, "Fetching organization");
    deps.api.get_organization(organization_id).await
}

/// Organizations currently in `status`.
pub async fn list_organizations_by_state(
    status: OrganizationStatus,
    deps: &ClientDeps,
) -> Result<Vec<Organization>, LifecycleError> {
    let actor = current_actor(deps).await?;
    actor.can(Capability::ViewOrganizationsByState).check()?;

    debug!(estado = %status, "Listing organizations by state");
    Ok(deps.api.list_organizations_by_state(status).await?)
}

/// Audit history of one organization.
pub async fn organization_audit_history(
    organization_id: OrganizationId,
    deps: &ClientDeps,
) -> Result<Vec<AuditRecord>, LifecycleError> {
    let actor = current_actor(deps).await?;
    actor.can(Capability::ViewAuditLog).check()?;

    debug!(organization_id = %organization_id, "Fetching organization audit history");
    Ok(deps.api.get_organization_audit(organization_id).await?)
}

/// Most recent audit records across all organizations.
pub async fn recent_audit_records(
    limit: Option<u32>,
    deps: &ClientDeps,
) -> Result<Vec<AuditRecord>, LifecycleError> {
    let actor = current_actor(deps).await?;
    actor.can(Capability::ViewAuditLog).check()?;

    let limit = limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    debug!(limit, "Fetching recent audit records");
    Ok(deps.api.get_recent_audit_records(limit).await?)
}

/// Submit an organization. Never sends a form that has field errors.
pub async fn submit_organization(
    mut fields: OrganizationRegistration,
    deps: &ClientDeps,
) -> Result<Organization, SubmitError> {
    fields.normalize();
    fields.validate_with(&deps.public_domains)?;

    info!(cif = %fields.cif, nombre = %fields.nombre_oficial, "Submitting organization");
    Ok(deps.api.submit_organization(&fields).await?)
}
