//! Assignment request body.

use serde::{Deserialize, Serialize};

use crate::common::{PatientId, ProfessionalId};
use crate::domains::validation::FieldErrors;

/// Body of `POST /asignaciones`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub profesional_id: ProfessionalId,
    pub paciente_id: PatientId,
    pub es_principal: bool,
}

impl AssignmentRequest {
    pub fn new(professional: ProfessionalId, patient: PatientId) -> Self {
        Self {
            profesional_id: professional,
            paciente_id: patient,
            es_principal: false,
        }
    }

    /// Mark the professional as the patient's main professional.
    pub fn principal(mut self) -> Self {
        self.es_principal = true;
        self
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.profesional_id.raw() <= 0 {
            errors.add("profesionalId", "Selecciona un profesional");
        }
        if self.paciente_id.raw() <= 0 {
            errors.add("pacienteId", "Selecciona un paciente");
        }
        errors.into_result()
    }
}
