// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "change an organization's state") lives in domain
// actions that call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAlmaApi)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{AssignmentId, OrganizationId, PatientId, ProfessionalId};
use crate::domains::assignments::data::AssignmentRequest;
use crate::domains::assignments::models::Assignment;
use crate::domains::auth::models::{LoginRequest, LoginResponse, PasswordUpdate};
use crate::domains::organization::data::{
    OrganizationRegistration, OrganizationSignup, StateChangeRequest,
};
use crate::domains::organization::models::{AuditRecord, Organization, OrganizationStatus};
use crate::domains::users::data::{PatientRegistration, ProfessionalRegistration};
use crate::domains::users::models::UserSummary;
use crate::kernel::ApiError;

// =============================================================================
// Backend API Trait
// =============================================================================

/// REST backend. Implementations attach the stored bearer token to every
/// request except login and organization signup.
#[async_trait]
pub trait BaseAlmaApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn register_organization(
        &self,
        signup: &OrganizationSignup,
    ) -> Result<LoginResponse, ApiError>;

    async fn update_password(&self, update: &PasswordUpdate) -> Result<(), ApiError>;

    async fn submit_organization(
        &self,
        fields: &OrganizationRegistration,
    ) -> Result<Organization, ApiError>;

    async fn get_organization(&self, id: OrganizationId) -> Result<Organization, ApiError>;

    /// The backend writes exactly one audit record per successful change.
    async fn change_organization_state(
        &self,
        id: OrganizationId,
        request: &StateChangeRequest,
    ) -> Result<Organization, ApiError>;

    async fn list_organizations_by_state(
        &self,
        status: OrganizationStatus,
    ) -> Result<Vec<Organization>, ApiError>;

    async fn get_organization_audit(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<AuditRecord>, ApiError>;

    async fn get_recent_audit_records(&self, limit: u32) -> Result<Vec<AuditRecord>, ApiError>;

    async fn register_patient(
        &self,
        form: &PatientRegistration,
    ) -> Result<UserSummary, ApiError>;

    async fn register_professional(
        &self,
        form: &ProfessionalRegistration,
    ) -> Result<UserSummary, ApiError>;

    async fn create_assignment(&self, request: &AssignmentRequest)
        -> Result<Assignment, ApiError>;

    async fn get_patient_assignments(&self, id: PatientId) -> Result<Vec<Assignment>, ApiError>;

    async fn get_professional_assignments(
        &self,
        id: ProfessionalId,
    ) -> Result<Vec<Assignment>, ApiError>;

    /// Returns the assignment with `activa = false`.
    async fn deactivate_assignment(&self, id: AssignmentId) -> Result<Assignment, ApiError>;

    async fn delete_assignment(&self, id: AssignmentId) -> Result<(), ApiError>;
}

// =============================================================================
// Credential Store Trait
// =============================================================================

/// Opaque key-value persistence for the session.
#[async_trait]
pub trait BaseCredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
