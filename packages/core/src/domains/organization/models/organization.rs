use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::OrganizationId;

/// Operational status. Controls whether the organization's users may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganizationStatus {
    #[serde(rename = "ACTIVA")]
    Active,
    #[serde(rename = "SUSPENDIDA")]
    Suspended,
    #[serde(rename = "BAJA")]
    Deregistered,
}

impl OrganizationStatus {
    pub const ALL: [OrganizationStatus; 3] = [
        OrganizationStatus::Active,
        OrganizationStatus::Suspended,
        OrganizationStatus::Deregistered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationStatus::Active => "ACTIVA",
            OrganizationStatus::Suspended => "SUSPENDIDA",
            OrganizationStatus::Deregistered => "BAJA",
        }
    }

    /// States reachable from this one through a state change.
    pub fn allowed_targets(&self) -> &'static [OrganizationStatus] {
        match self {
            OrganizationStatus::Active => &[OrganizationStatus::Suspended],
            OrganizationStatus::Suspended => {
                &[OrganizationStatus::Active, OrganizationStatus::Deregistered]
            }
            OrganizationStatus::Deregistered => &[],
        }
    }

    pub fn can_transition_to(&self, target: OrganizationStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// BAJA has no way out.
    pub fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }

    pub fn allows_login(&self) -> bool {
        matches!(self, OrganizationStatus::Active)
    }
}

impl std::fmt::Display for OrganizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrganizationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVA" => Ok(OrganizationStatus::Active),
            "SUSPENDIDA" => Ok(OrganizationStatus::Suspended),
            "BAJA" => Ok(OrganizationStatus::Deregistered),
            _ => Err(anyhow::anyhow!("Invalid organization status: {}", s)),
        }
    }
}

/// Document review status. Independent of [`OrganizationStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[serde(rename = "PENDIENTE_VERIFICACION")]
    Pending,
    #[serde(rename = "EN_REVISION")]
    InReview,
    #[serde(rename = "VERIFICADA")]
    Verified,
    #[serde(rename = "RECHAZADA")]
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "PENDIENTE_VERIFICACION",
            VerificationStatus::InReview => "EN_REVISION",
            VerificationStatus::Verified => "VERIFICADA",
            VerificationStatus::Rejected => "RECHAZADA",
        }
    }

    pub fn allowed_targets(&self) -> &'static [VerificationStatus] {
        match self {
            VerificationStatus::Pending => &[VerificationStatus::InReview],
            VerificationStatus::InReview => {
                &[VerificationStatus::Verified, VerificationStatus::Rejected]
            }
            VerificationStatus::Verified | VerificationStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, target: VerificationStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    pub fn is_final(&self) -> bool {
        self.allowed_targets().is_empty()
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDIENTE_VERIFICACION" => Ok(VerificationStatus::Pending),
            "EN_REVISION" => Ok(VerificationStatus::InReview),
            "VERIFICADA" => Ok(VerificationStatus::Verified),
            "RECHAZADA" => Ok(VerificationStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid verification status: {}", s)),
        }
    }
}

/// Organization as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: OrganizationId,
    pub cif: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_seguridad_social: Option<String>,
    pub nombre_oficial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_regcess: Option<String>,
    pub email_corporativo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono_contacto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documento_cif_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documento_seguridad_social_url: Option<String>,
    pub estado_verificacion: VerificationStatus,
    pub estado: OrganizationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo_rechazo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_registro: Option<NaiveDateTime>,
}

impl Organization {
    pub fn can_transition_to(&self, target: OrganizationStatus) -> bool {
        self.estado.can_transition_to(target)
    }

    pub fn allowed_targets(&self) -> &'static [OrganizationStatus] {
        self.estado.allowed_targets()
    }
}
