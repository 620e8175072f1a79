// TestDependencies - in-memory implementations for testing
//
// MockAlmaApi behaves like the backend for the organization endpoints: it
// keeps organizations in memory and writes one audit record per successful
// state change. Registered patients and professionals get a profile with the
// same id as their user, so they can be assigned to each other. Every call is recorded so tests can assert on call counts.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde_json::json;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{ApiError, BaseAlmaApi, BaseCredentialStore, ClientDeps};
use crate::common::auth::Role;
use crate::common::{
    AssignmentId, AuditRecordId, OrganizationId, PatientId, ProfessionalId, UserId,
};
use crate::domains::assignments::data::AssignmentRequest;
use crate::domains::assignments::models::{AssignedPatient, AssignedProfessional, Assignment};
use crate::domains::auth::models::{
    LoginRequest, LoginResponse, PasswordUpdate, EMAIL_KEY, PASSWORD_TEMPORAL_KEY, ROLE_KEY,
    TOKEN_KEY,
};
use crate::domains::organization::data::{
    OrganizationRegistration, OrganizationSignup, StateChangeRequest,
};
use crate::domains::organization::models::{
    AuditAction, AuditRecord, Organization, OrganizationStatus, VerificationStatus,
    ORGANIZATION_TABLE,
};
use crate::domains::users::data::{PatientRegistration, ProfessionalRegistration};
use crate::domains::users::models::UserSummary;
use crate::domains::validation::cif_control;

// =============================================================================
// Mock Backend API
// =============================================================================

#[derive(Debug, Clone)]
struct MockUser {
    password: String,
    role: Role,
    password_temporal: bool,
}

#[derive(Default)]
struct MockState {
    organizations: BTreeMap<OrganizationId, Organization>,
    audit: Vec<AuditRecord>,
    users: HashMap<String, MockUser>,
    next_user_id: i64,
    patients: BTreeMap<PatientId, AssignedPatient>,
    professionals: BTreeMap<ProfessionalId, AssignedProfessional>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    next_assignment_id: i64,
}

pub struct MockAlmaApi {
    state: Arc<Mutex<MockState>>,
    calls: Arc<Mutex<Vec<String>>>,
    failures: Arc<Mutex<VecDeque<ApiError>>>,
    reported_state: Arc<Mutex<Option<OrganizationStatus>>>,
    acting_admin: Arc<Mutex<String>>,
}

impl MockAlmaApi {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                next_user_id: 1,
                next_assignment_id: 1,
                ..Default::default()
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            reported_state: Arc::new(Mutex::new(None)),
            acting_admin: Arc::new(Mutex::new("superadmin@alma.es".to_string())),
        }
    }

    /// Seed an organization with the given id and status.
    pub fn with_organization(self, id: i64, estado: OrganizationStatus) -> Self {
        let organization = sample_organization(OrganizationId::from_raw(id), estado);
        self.state
            .lock()
            .unwrap()
            .organizations
            .insert(organization.id, organization);
        self
    }

    /// Accept `email` / `password` at login.
    pub fn with_user(self, email: &str, password: &str, role: Role) -> Self {
        self.state.lock().unwrap().users.insert(
            email.to_string(),
            MockUser {
                password: password.to_string(),
                role,
                password_temporal: false,
            },
        );
        self
    }

    /// Seed a patient profile.
    pub fn with_patient(self, id: i64, nombre: &str) -> Self {
        let usuario = sample_user(id, nombre, Role::Paciente);
        self.state.lock().unwrap().patients.insert(
            PatientId::from_raw(id),
            AssignedPatient {
                id: PatientId::from_raw(id),
                usuario,
                tarjeta_sanitaria: None,
                fecha_nacimiento: None,
                genero: None,
            },
        );
        self
    }

    /// Seed a professional profile.
    pub fn with_professional(self, id: i64, nombre: &str) -> Self {
        let usuario = sample_user(id, nombre, Role::Profesional);
        self.state.lock().unwrap().professionals.insert(
            ProfessionalId::from_raw(id),
            AssignedProfessional {
                id: ProfessionalId::from_raw(id),
                usuario,
                numero_colegiado: Some(format!("M-{:05}", id)),
                especialidad: Some("Psicología del duelo".to_string()),
                centro_salud: None,
            },
        );
        self
    }

    pub fn assignment(&self, id: i64) -> Option<Assignment> {
        self.state
            .lock()
            .unwrap()
            .assignments
            .get(&AssignmentId::from_raw(id))
            .cloned()
    }

    /// Fail the next call with `error`. Queued errors are used in order.
    pub fn fail_next(&self, error: ApiError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Report `estado` in state change responses, whatever was requested.
    pub fn report_state(&self, estado: OrganizationStatus) {
        *self.reported_state.lock().unwrap() = Some(estado);
    }

    pub fn organization(&self, id: i64) -> Option<Organization> {
        self.state
            .lock()
            .unwrap()
            .organizations
            .get(&OrganizationId::from_raw(id))
            .cloned()
    }

    pub fn audit_records(&self) -> Vec<AuditRecord> {
        self.state.lock().unwrap().audit.clone()
    }

    /// Names of the methods called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == method)
            .count()
    }

    fn record(&self, method: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(method.to_string());
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found(id: OrganizationId) -> ApiError {
        ApiError::NotFound(format!("Organización no encontrada con ID: {}", id))
    }

    fn assignment_not_found() -> ApiError {
        ApiError::NotFound("Asignación no encontrada.".to_string())
    }

    fn insert_organization(&self, fields: &OrganizationRegistration) -> Result<Organization, ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.organizations.values().any(|o| o.cif == fields.cif) {
            return Err(ApiError::Validation(format!(
                "Ya existe una organización con el CIF {}",
                fields.cif
            )));
        }

        let next_id = state
            .organizations
            .keys()
            .map(|id| id.raw())
            .max()
            .unwrap_or(0)
            + 1;
        let organization = Organization {
            id: OrganizationId::from_raw(next_id),
            cif: fields.cif.clone(),
            numero_seguridad_social: Some(fields.numero_seguridad_social.clone()),
            nombre_oficial: fields.nombre_oficial.clone(),
            direccion: Some(fields.direccion.clone()),
            codigo_regcess: Some(fields.codigo_regcess.clone()),
            email_corporativo: fields.email_corporativo.clone(),
            telefono_contacto: Some(fields.telefono_contacto.clone()),
            documento_cif_url: None,
            documento_seguridad_social_url: None,
            estado_verificacion: VerificationStatus::Pending,
            estado: OrganizationStatus::Active,
            motivo_rechazo: None,
            fecha_registro: Some(Local::now().naive_local()),
        };
        state
            .organizations
            .insert(organization.id, organization.clone());
        Ok(organization)
    }

    fn insert_user(
        &self,
        dni: &str,
        email: &str,
        nombre: &str,
        apellidos: &str,
        telefono: Option<&str>,
        role: Role,
    ) -> Result<UserSummary, ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.users.contains_key(email) {
            return Err(ApiError::Validation(format!(
                "El email {} ya está registrado",
                email
            )));
        }

        let id = state.next_user_id;
        state.next_user_id += 1;
        state.users.insert(
            email.to_string(),
            MockUser {
                password: "Temporal123".to_string(),
                role,
                password_temporal: true,
            },
        );

        Ok(UserSummary {
            id: UserId::from_raw(id),
            dni: Some(dni.to_string()),
            email: email.to_string(),
            nombre: nombre.to_string(),
            apellidos: apellidos.to_string(),
            telefono: telefono.map(str::to_string),
            tipo_usuario: role,
            activo: true,
            password_temporal: true,
            fecha_registro: Some(Local::now().naive_local()),
        })
    }
}

impl Default for MockAlmaApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAlmaApi for MockAlmaApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record("login")?;
        let state = self.state.lock().unwrap();
        match state.users.get(&request.email) {
            Some(user) if user.password == request.password => {
                *self.acting_admin.lock().unwrap() = request.email.clone();
                Ok(LoginResponse {
                    access_token: format!("token-{}", request.email),
                    email: request.email.clone(),
                    role: user.role,
                    token_type: "Bearer".to_string(),
                    password_temporal: user.password_temporal,
                })
            }
            _ => Err(ApiError::Unauthenticated(
                "Credenciales inválidas".to_string(),
            )),
        }
    }

    async fn register_organization(
        &self,
        signup: &OrganizationSignup,
    ) -> Result<LoginResponse, ApiError> {
        self.record("register_organization")?;
        self.insert_organization(&signup.organizacion)?;

        let admin = &signup.administrador;
        self.state.lock().unwrap().users.insert(
            admin.email.clone(),
            MockUser {
                password: admin.password.clone(),
                role: Role::AdminOrganizacion,
                password_temporal: false,
            },
        );

        Ok(LoginResponse {
            access_token: format!("token-{}", admin.email),
            email: admin.email.clone(),
            role: Role::AdminOrganizacion,
            token_type: "Bearer".to_string(),
            password_temporal: false,
        })
    }

    async fn update_password(&self, update: &PasswordUpdate) -> Result<(), ApiError> {
        self.record("update_password")?;
        let email = self.acting_admin.lock().unwrap().clone();
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.get_mut(&email) {
            if user.password != update.old_password {
                return Err(ApiError::Validation(
                    "La contraseña actual no es correcta".to_string(),
                ));
            }
            user.password = update.new_password.clone();
            user.password_temporal = false;
        }
        Ok(())
    }

    async fn submit_organization(
        &self,
        fields: &OrganizationRegistration,
    ) -> Result<Organization, ApiError> {
        self.record("submit_organization")?;
        self.insert_organization(fields)
    }

    async fn get_organization(&self, id: OrganizationId) -> Result<Organization, ApiError> {
        self.record("get_organization")?;
        self.state
            .lock()
            .unwrap()
            .organizations
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn change_organization_state(
        &self,
        id: OrganizationId,
        request: &StateChangeRequest,
    ) -> Result<Organization, ApiError> {
        self.record("change_organization_state")?;
        if request.motivo.trim().is_empty() {
            return Err(ApiError::Validation(
                "El motivo es obligatorio".to_string(),
            ));
        }

        let admin = self.acting_admin.lock().unwrap().clone();
        let mut state = self.state.lock().unwrap();
        let organization = state
            .organizations
            .get_mut(&id)
            .ok_or_else(|| Self::not_found(id))?;

        let snapshot = |estado: OrganizationStatus, org: &Organization| {
            json!({
                "ESTADO": estado.as_str(),
                "NOMBRE_OFICIAL": org.nombre_oficial,
                "CIF": org.cif,
            })
        };
        let before = snapshot(organization.estado, &*organization);
        organization.estado = request.nuevo_estado;
        let after = snapshot(organization.estado, &*organization);
        let mut updated = organization.clone();

        let audit_id = AuditRecordId::from_raw(state.audit.len() as i64 + 1);
        state.audit.push(AuditRecord {
            id: audit_id,
            tipo_accion: AuditAction::for_status_change(request.nuevo_estado),
            tabla_afectada: ORGANIZATION_TABLE.to_string(),
            id_registro_afectado: id.raw(),
            datos_anteriores: Some(before),
            datos_nuevos: Some(after),
            motivo: request.motivo.clone(),
            ip_origen: Some("127.0.0.1".to_string()),
            fecha_accion: Some(Local::now().naive_local()),
            id_usuario_admin: Some(1),
            email_admin: admin,
            nombre_admin: Some("Super".to_string()),
            apellidos_admin: Some("Admin".to_string()),
        });

        if let Some(reported) = *self.reported_state.lock().unwrap() {
            updated.estado = reported;
        }
        Ok(updated)
    }

    async fn list_organizations_by_state(
        &self,
        status: OrganizationStatus,
    ) -> Result<Vec<Organization>, ApiError> {
        self.record("list_organizations_by_state")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .organizations
            .values()
            .filter(|o| o.estado == status)
            .cloned()
            .collect())
    }

    async fn get_organization_audit(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<AuditRecord>, ApiError> {
        self.record("get_organization_audit")?;
        let state = self.state.lock().unwrap();
        if !state.organizations.contains_key(&id) {
            return Err(Self::not_found(id));
        }
        Ok(state
            .audit
            .iter()
            .rev()
            .filter(|r| r.id_registro_afectado == id.raw())
            .cloned()
            .collect())
    }

    async fn get_recent_audit_records(&self, limit: u32) -> Result<Vec<AuditRecord>, ApiError> {
        self.record("get_recent_audit_records")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .audit
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn register_patient(
        &self,
        form: &PatientRegistration,
    ) -> Result<UserSummary, ApiError> {
        self.record("register_patient")?;
        let usuario = self.insert_user(
            &form.dni,
            &form.email,
            &form.nombre,
            &form.apellidos,
            form.telefono.as_deref(),
            Role::Paciente,
        )?;
        let fecha_nacimiento = form
            .fecha_nacimiento
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        let id = PatientId::from_raw(usuario.id.raw());
        self.state.lock().unwrap().patients.insert(
            id,
            AssignedPatient {
                id,
                usuario: usuario.clone(),
                tarjeta_sanitaria: form.tarjeta_sanitaria.clone(),
                fecha_nacimiento,
                genero: form.genero,
            },
        );
        Ok(usuario)
    }

    async fn register_professional(
        &self,
        form: &ProfessionalRegistration,
    ) -> Result<UserSummary, ApiError> {
        self.record("register_professional")?;
        let usuario = self.insert_user(
            &form.dni,
            &form.email,
            &form.nombre,
            &form.apellidos,
            form.telefono.as_deref(),
            Role::Profesional,
        )?;

        let id = ProfessionalId::from_raw(usuario.id.raw());
        self.state.lock().unwrap().professionals.insert(
            id,
            AssignedProfessional {
                id,
                usuario: usuario.clone(),
                numero_colegiado: form.numero_colegiado.clone(),
                especialidad: form.especialidad.clone(),
                centro_salud: None,
            },
        );
        Ok(usuario)
    }

    async fn create_assignment(
        &self,
        request: &AssignmentRequest,
    ) -> Result<Assignment, ApiError> {
        self.record("create_assignment")?;
        let mut state = self.state.lock().unwrap();
        let (Some(profesional), Some(paciente)) = (
            state.professionals.get(&request.profesional_id).cloned(),
            state.patients.get(&request.paciente_id).cloned(),
        ) else {
            return Err(ApiError::NotFound(
                "Profesional o paciente no encontrado.".to_string(),
            ));
        };

        if state
            .assignments
            .values()
            .any(|a| a.activa && a.links(request.profesional_id, request.paciente_id))
        {
            return Err(ApiError::Validation(
                "Ya existe una asignación activa entre este profesional y paciente".to_string(),
            ));
        }

        let id = AssignmentId::from_raw(state.next_assignment_id);
        state.next_assignment_id += 1;
        let assignment = Assignment {
            id,
            profesional,
            paciente,
            fecha_asignacion: Some(Local::now().naive_local()),
            activa: true,
            es_principal: request.es_principal,
        };
        state.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }

    async fn get_patient_assignments(&self, id: PatientId) -> Result<Vec<Assignment>, ApiError> {
        self.record("get_patient_assignments")?;
        let state = self.state.lock().unwrap();
        if !state.patients.contains_key(&id) {
            return Err(ApiError::NotFound("Paciente no encontrado.".to_string()));
        }
        Ok(state
            .assignments
            .values()
            .filter(|a| a.paciente.id == id)
            .cloned()
            .collect())
    }

    async fn get_professional_assignments(
        &self,
        id: ProfessionalId,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.record("get_professional_assignments")?;
        let state = self.state.lock().unwrap();
        if !state.professionals.contains_key(&id) {
            return Err(ApiError::NotFound("Profesional no encontrado.".to_string()));
        }
        Ok(state
            .assignments
            .values()
            .filter(|a| a.profesional.id == id)
            .cloned()
            .collect())
    }

    async fn deactivate_assignment(&self, id: AssignmentId) -> Result<Assignment, ApiError> {
        self.record("deactivate_assignment")?;
        let mut state = self.state.lock().unwrap();
        let assignment = state
            .assignments
            .get_mut(&id)
            .ok_or_else(Self::assignment_not_found)?;
        assignment.activa = false;
        Ok(assignment.clone())
    }

    async fn delete_assignment(&self, id: AssignmentId) -> Result<(), ApiError> {
        self.record("delete_assignment")?;
        self.state
            .lock()
            .unwrap()
            .assignments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(Self::assignment_not_found)
    }
}

/// Organization with valid identifiers, used to seed the mock.
///
/// Ids above 9999999 do not fit a CIF and get an invalid one.
pub fn sample_organization(id: OrganizationId, estado: OrganizationStatus) -> Organization {
    let digits = format!("{:07}", id.raw());
    let control = cif_control(&digits).map(|(digit, _)| digit).unwrap_or(0);

    Organization {
        id,
        cif: format!("B{}{}", digits, control),
        numero_seguridad_social: Some("281234567840".to_string()),
        nombre_oficial: format!("Organización {}", id),
        direccion: Some("Calle Mayor 1, Madrid".to_string()),
        codigo_regcess: Some("ES-28000123".to_string()),
        email_corporativo: format!("contacto{}@organizacion.es", id),
        telefono_contacto: Some("912345678".to_string()),
        documento_cif_url: None,
        documento_seguridad_social_url: None,
        estado_verificacion: VerificationStatus::Verified,
        estado,
        motivo_rechazo: None,
        fecha_registro: None,
    }
}

fn sample_user(id: i64, nombre: &str, role: Role) -> UserSummary {
    UserSummary {
        id: UserId::from_raw(id),
        dni: None,
        email: format!("{}{}@centroalma.es", nombre.to_lowercase(), id),
        nombre: nombre.to_string(),
        apellidos: "Prueba".to_string(),
        telefono: None,
        tipo_usuario: role,
        activo: true,
        password_temporal: false,
        fecha_registro: None,
    }
}

// =============================================================================
// In-memory Credential Store
// =============================================================================

pub struct MemoryCredentialStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a session for `email` with `role`.
    pub fn signed_in(self, email: &str, role: Role) -> Self {
        {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(TOKEN_KEY.to_string(), format!("token-{}", email));
            entries.insert(EMAIL_KEY.to_string(), email.to_string());
            entries.insert(ROLE_KEY.to_string(), role.as_str().to_string());
            entries.insert(PASSWORD_TEMPORAL_KEY.to_string(), "false".to_string());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub api: Arc<MockAlmaApi>,
    pub credentials: Arc<MemoryCredentialStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            api: Arc::new(MockAlmaApi::new()),
            credentials: Arc::new(MemoryCredentialStore::new()),
        }
    }

    /// Set a mock API
    pub fn mock_api(mut self, api: MockAlmaApi) -> Self {
        self.api = Arc::new(api);
        self
    }

    /// Start with a stored session
    pub fn signed_in(mut self, email: &str, role: Role) -> Self {
        self.credentials = Arc::new(MemoryCredentialStore::new().signed_in(email, role));
        self
    }

    /// Convert into ClientDeps for actions
    pub fn into_deps(&self) -> ClientDeps {
        ClientDeps::new(self.api.clone(), self.credentials.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::validation::{
        is_valid_cif, is_valid_email, is_valid_phone, is_valid_social_security_number,
    };

    #[test]
    fn test_sample_organization_identifiers_are_valid() {
        for id in [1, 2, 3, 42, 1234567] {
            let organization =
                sample_organization(OrganizationId::from_raw(id), OrganizationStatus::Active);
            assert!(is_valid_cif(&organization.cif), "{}", organization.cif);
            assert!(is_valid_email(&organization.email_corporativo));
            assert!(is_valid_phone(
                organization.telefono_contacto.as_deref().unwrap()
            ));
            assert!(is_valid_social_security_number(
                organization.numero_seguridad_social.as_deref().unwrap()
            ));
        }
    }
}
