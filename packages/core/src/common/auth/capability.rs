use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AuthError;

/// User roles issued by the backend at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Administrator of a single organization
    AdminOrganizacion,
    Profesional,
    Paciente,
    /// Platform-wide administrator
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdminOrganizacion => "ADMIN_ORGANIZACION",
            Self::Profesional => "PROFESIONAL",
            Self::Paciente => "PACIENTE",
            Self::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Human-readable role name shown on dashboards
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AdminOrganizacion => "Administrador de Organización",
            Self::Profesional => "Profesional",
            Self::Paciente => "Paciente",
            Self::SuperAdmin => "Super Administrador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN_ORGANIZACION" => Ok(Self::AdminOrganizacion),
            "PROFESIONAL" => Ok(Self::Profesional),
            "PACIENTE" => Ok(Self::Paciente),
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

/// Gated actions in the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Activate, suspend or deregister an organization
    ChangeOrganizationState,

    /// Browse organizations filtered by operational state
    ViewOrganizationsByState,

    /// Read the administrative audit log
    ViewAuditLog,

    /// Register patients and professionals inside an organization
    RegisterStaff,

    /// Assign patients to professionals
    ManageAssignments,

    /// See the patients assigned to oneself
    ViewOwnPatients,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ChangeOrganizationState => "change organization state",
            Self::ViewOrganizationsByState => "view organizations by state",
            Self::ViewAuditLog => "view audit log",
            Self::RegisterStaff => "register staff",
            Self::ManageAssignments => "manage assignments",
            Self::ViewOwnPatients => "view own patients",
        };
        f.write_str(label)
    }
}

/// Capability table shared by UI gating and pre-flight checks.
pub fn has_capability(role: Role, capability: Capability) -> bool {
    use Capability::*;

    match role {
        Role::SuperAdmin => matches!(
            capability,
            ChangeOrganizationState | ViewOrganizationsByState | ViewAuditLog
        ),
        Role::AdminOrganizacion => matches!(capability, RegisterStaff | ManageAssignments),
        Role::Profesional => matches!(capability, ViewOwnPatients),
        Role::Paciente => false,
    }
}
