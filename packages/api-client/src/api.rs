use alma_core::common::{AssignmentId, OrganizationId, PatientId, ProfessionalId};
use alma_core::domains::assignments::data::AssignmentRequest;
use alma_core::domains::assignments::models::Assignment;
use alma_core::domains::auth::models::{LoginRequest, LoginResponse, PasswordUpdate};
use alma_core::domains::organization::data::{
    OrganizationRegistration, OrganizationSignup, StateChangeRequest,
};
use alma_core::domains::organization::models::{AuditRecord, Organization, OrganizationStatus};
use alma_core::domains::users::data::{PatientRegistration, ProfessionalRegistration};
use alma_core::domains::users::models::UserSummary;
use alma_core::kernel::{ApiError, BaseAlmaApi};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::AlmaClient;

fn to_body(body: &impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::Parse(format!("Failed to serialize request: {}", e)).into())
}

#[async_trait]
impl BaseAlmaApi for AlmaClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        Ok(self.post("/auth/login", to_body(request)?).await?)
    }

    async fn register_organization(
        &self,
        signup: &OrganizationSignup,
    ) -> Result<LoginResponse, ApiError> {
        Ok(self
            .post("/auth/register-organization", to_body(signup)?)
            .await?)
    }

    async fn update_password(&self, update: &PasswordUpdate) -> Result<(), ApiError> {
        let _: Value = self.put("/usuarios/me/password", Some(to_body(update)?)).await?;
        Ok(())
    }

    async fn submit_organization(
        &self,
        fields: &OrganizationRegistration,
    ) -> Result<Organization, ApiError> {
        Ok(self.post("/organizaciones", to_body(fields)?).await?)
    }

    async fn get_organization(&self, id: OrganizationId) -> Result<Organization, ApiError> {
        Ok(self.get(&format!("/organizaciones/{}", id)).await?)
    }

    async fn change_organization_state(
        &self,
        id: OrganizationId,
        request: &StateChangeRequest,
    ) -> Result<Organization, ApiError> {
        Ok(self
            .put(
                &format!("/organizaciones/{}/cambiar-estado", id),
                Some(to_body(request)?),
            )
            .await?)
    }

    async fn list_organizations_by_state(
        &self,
        status: OrganizationStatus,
    ) -> Result<Vec<Organization>, ApiError> {
        Ok(self
            .get(&format!("/organizaciones/estado/{}", status.as_str()))
            .await?)
    }

    async fn get_organization_audit(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<AuditRecord>, ApiError> {
        Ok(self
            .get(&format!("/organizaciones/{}/auditoria", id))
            .await?)
    }

    async fn get_recent_audit_records(&self, limit: u32) -> Result<Vec<AuditRecord>, ApiError> {
        Ok(self
            .get(&format!("/organizaciones/auditoria/recientes?limit={}", limit))
            .await?)
    }

    async fn register_patient(
        &self,
        form: &PatientRegistration,
    ) -> Result<UserSummary, ApiError> {
        Ok(self.post("/auth/register/paciente", to_body(form)?).await?)
    }

    async fn register_professional(
        &self,
        form: &ProfessionalRegistration,
    ) -> Result<UserSummary, ApiError> {
        Ok(self
            .post("/auth/register/profesional", to_body(form)?)
            .await?)
    }

    async fn create_assignment(
        &self,
        request: &AssignmentRequest,
    ) -> Result<Assignment, ApiError> {
        Ok(self.post("/asignaciones", to_body(request)?).await?)
    }

    async fn get_patient_assignments(&self, id: PatientId) -> Result<Vec<Assignment>, ApiError> {
        Ok(self
            .get(&format!("/asignaciones/paciente/{}", id))
            .await?)
    }

    async fn get_professional_assignments(
        &self,
        id: ProfessionalId,
    ) -> Result<Vec<Assignment>, ApiError> {
        Ok(self
            .get(&format!("/asignaciones/profesional/{}", id))
            .await?)
    }

    async fn deactivate_assignment(&self, id: AssignmentId) -> Result<Assignment, ApiError> {
        Ok(self
            .put(&format!("/asignaciones/{}/deactivate", id), None)
            .await?)
    }

    async fn delete_assignment(&self, id: AssignmentId) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("/asignaciones/{}", id)).await?;
        Ok(())
    }
}
