use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::OrganizationStatus;
use crate::common::AuditRecordId;

/// Table name the backend records for organization changes.
pub const ORGANIZATION_TABLE: &str = "ORGANIZACION";

/// Snapshot key holding the organization status.
pub const STATUS_SNAPSHOT_KEY: &str = "ESTADO";

/// Kind of administrative action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "VERIFICAR_ORGANIZACION")]
    VerifyOrganization,
    #[serde(rename = "RECHAZAR_ORGANIZACION")]
    RejectOrganization,
    #[serde(rename = "SUSPENDER_ORGANIZACION")]
    SuspendOrganization,
    #[serde(rename = "ACTIVAR_ORGANIZACION")]
    ActivateOrganization,
    #[serde(rename = "DAR_BAJA_ORGANIZACION")]
    DeregisterOrganization,
    #[serde(rename = "MODIFICAR_ORGANIZACION")]
    ModifyOrganization,
    #[serde(rename = "CREAR_SUPER_ADMIN")]
    CreateSuperAdmin,
    #[serde(rename = "ELIMINAR_USUARIO")]
    DeleteUser,
    #[serde(rename = "MODIFICAR_PERMISOS")]
    ModifyPermissions,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::VerifyOrganization => "VERIFICAR_ORGANIZACION",
            AuditAction::RejectOrganization => "RECHAZAR_ORGANIZACION",
            AuditAction::SuspendOrganization => "SUSPENDER_ORGANIZACION",
            AuditAction::ActivateOrganization => "ACTIVAR_ORGANIZACION",
            AuditAction::DeregisterOrganization => "DAR_BAJA_ORGANIZACION",
            AuditAction::ModifyOrganization => "MODIFICAR_ORGANIZACION",
            AuditAction::CreateSuperAdmin => "CREAR_SUPER_ADMIN",
            AuditAction::DeleteUser => "ELIMINAR_USUARIO",
            AuditAction::ModifyPermissions => "MODIFICAR_PERMISOS",
        }
    }

    /// Action recorded when an organization moves into `target`.
    pub fn for_status_change(target: OrganizationStatus) -> Self {
        match target {
            OrganizationStatus::Active => AuditAction::ActivateOrganization,
            OrganizationStatus::Suspended => AuditAction::SuspendOrganization,
            OrganizationStatus::Deregistered => AuditAction::DeregisterOrganization,
        }
    }

    pub fn is_status_change(&self) -> bool {
        matches!(
            self,
            AuditAction::ActivateOrganization
                | AuditAction::SuspendOrganization
                | AuditAction::DeregisterOrganization
        )
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuditAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_value(JsonValue::String(s.trim().to_uppercase()))
            .map_err(|_| anyhow::anyhow!("Invalid audit action: {}", s))
    }
}

/// Audit log entry. Written by the backend, read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: AuditRecordId,
    pub tipo_accion: AuditAction,
    pub tabla_afectada: String,
    pub id_registro_afectado: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datos_anteriores: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datos_nuevos: Option<JsonValue>,
    #[serde(default)]
    pub motivo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_origen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_accion: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_usuario_admin: Option<i64>,
    #[serde(default)]
    pub email_admin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_admin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellidos_admin: Option<String>,
}

impl AuditRecord {
    /// Status before the change, read from the `datosAnteriores` snapshot.
    pub fn previous_status(&self) -> Option<OrganizationStatus> {
        snapshot_status(self.datos_anteriores.as_ref())
    }

    /// Status after the change, read from the `datosNuevos` snapshot.
    pub fn new_status(&self) -> Option<OrganizationStatus> {
        snapshot_status(self.datos_nuevos.as_ref())
    }

    pub fn admin_display_name(&self) -> String {
        match (&self.nombre_admin, &self.apellidos_admin) {
            (Some(nombre), Some(apellidos)) => format!("{} {}", nombre, apellidos),
            (Some(nombre), None) => nombre.clone(),
            _ => self.email_admin.clone(),
        }
    }
}

fn snapshot_status(snapshot: Option<&JsonValue>) -> Option<OrganizationStatus> {
    snapshot?
        .get(STATUS_SNAPSHOT_KEY)?
        .as_str()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_for_status_change() {
        assert_eq!(
            AuditAction::for_status_change(OrganizationStatus::Suspended),
            AuditAction::SuspendOrganization
        );
        assert_eq!(
            AuditAction::for_status_change(OrganizationStatus::Active),
            AuditAction::ActivateOrganization
        );
        assert_eq!(
            AuditAction::for_status_change(OrganizationStatus::Deregistered).as_str(),
            "DAR_BAJA_ORGANIZACION"
        );
        assert!(!AuditAction::VerifyOrganization.is_status_change());
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(
            "crear_super_admin".parse::<AuditAction>().unwrap(),
            AuditAction::CreateSuperAdmin
        );
        assert!("BORRAR_TODO".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_record_snapshots() {
        let json = r#"{
            "id": 12,
            "idUsuarioAdmin": 1,
            "emailAdmin": "root@alma.es",
            "nombreAdmin": "Ana",
            "apellidosAdmin": "Ruiz",
            "tipoAccion": "SUSPENDER_ORGANIZACION",
            "tablaAfectada": "ORGANIZACION",
            "idRegistroAfectado": 7,
            "datosAnteriores": {"ESTADO": "ACTIVA", "CIF": "A58818501"},
            "datosNuevos": {"ESTADO": "SUSPENDIDA", "CIF": "A58818501"},
            "motivo": "Impago",
            "ipOrigen": "10.0.0.1",
            "fechaAccion": "2024-05-02T09:00:00"
        }"#;

        let record: AuditRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tipo_accion, AuditAction::SuspendOrganization);
        assert_eq!(record.previous_status(), Some(OrganizationStatus::Active));
        assert_eq!(record.new_status(), Some(OrganizationStatus::Suspended));
        assert_eq!(record.admin_display_name(), "Ana Ruiz");
    }
}
