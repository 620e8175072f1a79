//! Assignments domain actions

use tracing::info;

use crate::common::auth::{Actor, AuthError, Capability};
use crate::common::{AssignmentId, PatientId, ProfessionalId};
use crate::domains::assignments::data::AssignmentRequest;
use crate::domains::assignments::errors::AssignmentError;
use crate::domains::assignments::models::Assignment;
use crate::domains::auth::actions::current_actor;
use crate::kernel::ClientDeps;

/// Admins manage assignments; professionals may read them.
fn check_can_view(actor: &Actor) -> Result<(), AuthError> {
    actor
        .can(Capability::ManageAssignments)
        .check()
        .or_else(|_| actor.can(Capability::ViewOwnPatients).check())
}

/// Assign a professional to a patient.
pub async fn create_assignment(
    request: AssignmentRequest,
    deps: &ClientDeps,
) -> Result<Assignment, AssignmentError> {
    request.validate()?;

    let actor = current_actor(deps).await?;
    actor.can(Capability::ManageAssignments).check()?;

    info!(
        admin = %actor.email(),
        professional_id = %request.profesional_id,
        patient_id = %request.paciente_id,
        principal = request.es_principal,
        "Creating assignment"
    );
    Ok(deps.api.create_assignment(&request).await?)
}

/// Assignments of one patient, active or not.
pub async fn patient_assignments(
    id: PatientId,
    deps: &ClientDeps,
) -> Result<Vec<Assignment>, AssignmentError> {
    let actor = current_actor(deps).await?;
    check_can_view(&actor)?;

    Ok(deps.api.get_patient_assignments(id).await?)
}

/// Assignments of one professional, active or not.
pub async fn professional_assignments(
    id: ProfessionalId,
    deps: &ClientDeps,
) -> Result<Vec<Assignment>, AssignmentError> {
    let actor = current_actor(deps).await?;
    check_can_view(&actor)?;

    Ok(deps.api.get_professional_assignments(id).await?)
}

/// Mark an assignment inactive. The record is kept.
pub async fn deactivate_assignment(
    id: AssignmentId,
    deps: &ClientDeps,
) -> Result<Assignment, AssignmentError> {
    let actor = current_actor(deps).await?;
    actor.can(Capability::ManageAssignments).check()?;

    info!(admin = %actor.email(), assignment_id = %id, "Deactivating assignment");
    Ok(deps.api.deactivate_assignment(id).await?)
}

pub async fn delete_assignment(id: AssignmentId, deps: &ClientDeps) -> Result<(), AssignmentError> {
    let actor = current_actor(deps).await?;
    actor.can(Capability::ManageAssignments).check()?;

    info!(admin = %actor.email(), assignment_id = %id, "Deleting assignment");
    Ok(deps.api.delete_assignment(id).await?)
}
