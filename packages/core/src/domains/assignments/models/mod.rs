use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::common::{AssignmentId, PatientId, ProfessionalId};
use crate::domains::users::data::Gender;
use crate::domains::users::models::UserSummary;

/// Professional side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedProfessional {
    pub id: ProfessionalId,
    pub usuario: UserSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_colegiado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centro_salud: Option<String>,
}

/// Patient side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPatient {
    pub id: PatientId,
    pub usuario: UserSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarjeta_sanitaria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<Gender>,
}

/// A professional-patient assignment.
///
/// Deactivated assignments stay in the backend with `activa = false`;
/// deleting removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub profesional: AssignedProfessional,
    pub paciente: AssignedPatient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_asignacion: Option<NaiveDateTime>,
    pub activa: bool,
    #[serde(default)]
    pub es_principal: bool,
}

impl Assignment {
    /// True when this links `professional` and `patient`.
    pub fn links(&self, professional: ProfessionalId, patient: PatientId) -> bool {
        self.profesional.id == professional && self.paciente.id == patient
    }
}
