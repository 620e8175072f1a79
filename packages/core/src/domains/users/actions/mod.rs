//! Users domain actions - staff registration

use tracing::info;

use crate::common::auth::Capability;
use crate::domains::auth::actions::current_actor;
use crate::domains::users::data::{PatientRegistration, ProfessionalRegistration};
use crate::domains::users::models::UserSummary;
use crate::kernel::{ClientDeps, SubmitError};

/// Register a patient in the admin's organization.
pub async fn register_patient(
    mut form: PatientRegistration,
    deps: &ClientDeps,
) -> Result<UserSummary, SubmitError> {
    form.normalize();
    form.validate()?;

    let actor = current_actor(deps).await?;
    actor.can(Capability::RegisterStaff).check()?;

    info!(admin = %actor.email(), email = %form.email, "Registering patient");
    Ok(deps.api.register_patient(&form).await?)
}

/// Register a professional in the admin's organization.
pub async fn register_professional(
    mut form: ProfessionalRegistration,
    deps: &ClientDeps,
) -> Result<UserSummary, SubmitError> {
    form.normalize();
    form.validate()?;

    let actor = current_actor(deps).await?;
    actor.can(Capability::RegisterStaff).check()?;

    info!(admin = %actor.email(), email = %form.email, "Registering professional");
    Ok(deps.api.register_professional(&form).await?)
}
