//! Staff registration forms.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domains::validation::{
    is_valid_birth_date_on, is_valid_dni, is_valid_email, is_valid_health_card, is_valid_phone,
    is_valid_professional_number, FieldErrors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Masculino,
    Femenino,
    NoBinario,
    PrefieroNoDecir,
}

/// Body of `POST /auth/register/paciente`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistration {
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub dni: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarjeta_sanitaria: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<Gender>,
}

impl PatientRegistration {
    /// Trim fields, uppercase the DNI and drop blank optional values.
    pub fn normalize(&mut self) {
        normalize_person(&mut self.nombre, &mut self.apellidos, &mut self.email, &mut self.dni);
        normalize_optional(&mut self.telefono);
        normalize_optional(&mut self.tarjeta_sanitaria);
        normalize_optional(&mut self.fecha_nacimiento);
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validate with an explicit "today" for the birth date check.
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = person_errors(&self.nombre, &self.apellidos, &self.email, &self.dni);

        errors.optional_valid(
            "telefono",
            self.telefono.as_deref(),
            is_valid_phone,
            "El teléfono no es válido (formato español)",
        );
        errors.optional_valid(
            "tarjetaSanitaria",
            self.tarjeta_sanitaria.as_deref(),
            is_valid_health_card,
            "La tarjeta sanitaria no es válida",
        );
        if let Some(fecha) = self.fecha_nacimiento.as_deref() {
            if !is_valid_birth_date_on(fecha, today) {
                errors.add(
                    "fechaNacimiento",
                    "La fecha de nacimiento no es válida (formato: AAAA-MM-DD)",
                );
            }
        }

        errors.into_result()
    }
}

/// Body of `POST /auth/register/profesional`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalRegistration {
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub dni: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_colegiado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centro_salud: Option<String>,
}

impl ProfessionalRegistration {
    pub fn normalize(&mut self) {
        normalize_person(&mut self.nombre, &mut self.apellidos, &mut self.email, &mut self.dni);
        normalize_optional(&mut self.telefono);
        normalize_optional(&mut self.numero_colegiado);
        normalize_optional(&mut self.especialidad);
        normalize_optional(&mut self.centro_salud);
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = person_errors(&self.nombre, &self.apellidos, &self.email, &self.dni);

        errors.optional_valid(
            "telefono",
            self.telefono.as_deref(),
            is_valid_phone,
            "El teléfono no es válido (formato español)",
        );
        errors.optional_valid(
            "numeroColegiado",
            self.numero_colegiado.as_deref(),
            is_valid_professional_number,
            "El número de colegiado no es válido",
        );

        errors.into_result()
    }
}

fn person_errors(nombre: &str, apellidos: &str, email: &str, dni: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.require("nombre", nombre, "El nombre es obligatorio");
    errors.require("apellidos", apellidos, "Los apellidos son obligatorios");
    errors.require_valid(
        "email",
        email,
        is_valid_email,
        "El email es obligatorio",
        "El email no es válido",
    );
    errors.require_valid(
        "dni",
        dni,
        is_valid_dni,
        "El DNI/NIE es obligatorio",
        "El DNI/NIE no es válido",
    );
    errors
}

fn normalize_person(nombre: &mut String, apellidos: &mut String, email: &mut String, dni: &mut String) {
    *nombre = nombre.trim().to_string();
    *apellidos = apellidos.trim().to_string();
    *email = email.trim().to_lowercase();
    *dni = dni.trim().to_uppercase();
}

fn normalize_optional(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}
