//! Request payloads for the organization endpoints and their form checks.

use serde::{Deserialize, Serialize};

use crate::domains::organization::models::OrganizationStatus;
use crate::domains::validation::{
    is_valid_cif, is_valid_corporate_email_with, is_valid_dni, is_valid_email, is_valid_password,
    is_valid_phone, is_valid_regcess_code, is_valid_social_security_number, FieldErrors,
    PublicDomains,
};

/// Position recorded for the admin created together with an organization.
pub const DEFAULT_ADMIN_POSITION: &str = "Administrador";

/// Body of `PUT /organizaciones/{id}/cambiar-estado`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChangeRequest {
    pub nuevo_estado: OrganizationStatus,
    pub motivo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl StateChangeRequest {
    pub fn new(target: OrganizationStatus, reason: impl Into<String>) -> Self {
        Self {
            nuevo_estado: target,
            motivo: reason.into().trim().to_string(),
            observaciones: None,
        }
    }

    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        let observations = observations.into().trim().to_string();
        self.observaciones = (!observations.is_empty()).then_some(observations);
        self
    }

    pub fn has_reason(&self) -> bool {
        !self.motivo.trim().is_empty()
    }
}

/// Organization fields entered on the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRegistration {
    pub nombre_oficial: String,
    pub cif: String,
    pub email_corporativo: String,
    pub telefono_contacto: String,
    pub direccion: String,
    pub numero_seguridad_social: String,
    pub codigo_regcess: String,
}

impl OrganizationRegistration {
    /// Trim every field and uppercase the identifiers.
    pub fn normalize(&mut self) {
        for field in [
            &mut self.nombre_oficial,
            &mut self.email_corporativo,
            &mut self.telefono_contacto,
            &mut self.direccion,
            &mut self.numero_seguridad_social,
        ] {
            *field = field.trim().to_string();
        }
        self.cif = self.cif.trim().to_uppercase();
        self.codigo_regcess = self.codigo_regcess.trim().to_uppercase();
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.validate_with(&PublicDomains::default())
    }

    pub fn validate_with(&self, public_domains: &PublicDomains) -> Result<(), FieldErrors> {
        self.field_errors(public_domains).into_result()
    }

    fn field_errors(&self, public_domains: &PublicDomains) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.require(
            "nombreOficial",
            &self.nombre_oficial,
            "El nombre es obligatorio",
        );

        errors.require_valid(
            "cif",
            &self.cif,
            is_valid_cif,
            "El CIF es obligatorio",
            "El CIF no es válido. Verifica el formato y dígito de control",
        );

        if errors.require(
            "emailCorporativo",
            &self.email_corporativo,
            "El email es obligatorio",
        ) {
            if !is_valid_email(&self.email_corporativo) {
                errors.add("emailCorporativo", "El formato del email no es válido");
            } else if !is_valid_corporate_email_with(&self.email_corporativo, public_domains) {
                errors.add(
                    "emailCorporativo",
                    "Debe usar un email corporativo, no dominios públicos (gmail, hotmail, etc.)",
                );
            }
        }

        errors.require_valid(
            "telefonoContacto",
            &self.telefono_contacto,
            is_valid_phone,
            "El teléfono es obligatorio",
            "El teléfono no es válido (formato español)",
        );

        errors.require("direccion", &self.direccion, "La dirección es obligatoria");

        errors.require_valid(
            "numeroSeguridadSocial",
            &self.numero_seguridad_social,
            is_valid_social_security_number,
            "El número de la Seguridad Social es obligatorio",
            "El número de la Seguridad Social no es válido. Formato: PP/NNNNNNNN/DD (12 dígitos)",
        );

        errors.require_valid(
            "codigoRegcess",
            &self.codigo_regcess,
            is_valid_regcess_code,
            "El código REGCESS es obligatorio",
            "El código REGCESS no tiene un formato válido",
        );

        errors
    }
}

/// Admin account created together with the organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRegistration {
    pub dni: String,
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub telefono: String,
    pub cargo: String,
    pub password: String,
    #[serde(skip)]
    pub password_confirmation: String,
}

impl AdminRegistration {
    pub fn normalize(&mut self) {
        self.dni = self.dni.trim().to_uppercase();
        self.nombre = self.nombre.trim().to_string();
        self.apellidos = self.apellidos.trim().to_string();
        self.email = self.email.trim().to_string();
        self.telefono = self.telefono.trim().to_string();
        self.cargo = match self.cargo.trim() {
            "" => DEFAULT_ADMIN_POSITION.to_string(),
            cargo => cargo.to_string(),
        };
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.field_errors().into_result()
    }

    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.require_valid(
            "dni",
            &self.dni,
            is_valid_dni,
            "El DNI/NIE es obligatorio",
            "El DNI/NIE no es válido",
        );
        errors.require("nombre", &self.nombre, "El nombre es obligatorio");
        errors.require(
            "apellidos",
            &self.apellidos,
            "Los apellidos son obligatorios",
        );
        errors.require_valid(
            "telefono",
            &self.telefono,
            is_valid_phone,
            "El teléfono es obligatorio",
            "El teléfono no es válido (formato español)",
        );

        if self.password.is_empty() {
            errors.add("password", "La contraseña es obligatoria");
        } else if !is_valid_password(&self.password) {
            errors.add(
                "password",
                "La contraseña debe tener al menos 8 caracteres",
            );
        }

        if self.password_confirmation.is_empty() {
            errors.add("confirmPassword", "Debe confirmar la contraseña");
        } else if self.password != self.password_confirmation {
            errors.add("confirmPassword", "Las contraseñas no coinciden");
        }

        errors
    }
}

/// Body of `POST /auth/register-organization`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSignup {
    #[serde(flatten)]
    pub organizacion: OrganizationRegistration,
    pub administrador: AdminRegistration,
}

impl OrganizationSignup {
    /// Build a signup, normalizing both parts. The admin logs in with the
    /// corporate email unless one was given.
    pub fn new(mut organizacion: OrganizationRegistration, mut administrador: AdminRegistration) -> Self {
        organizacion.normalize();
        if administrador.email.trim().is_empty() {
            administrador.email = organizacion.email_corporativo.clone();
        }
        administrador.normalize();
        Self {
            organizacion,
            administrador,
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.validate_with(&PublicDomains::default())
    }

    /// Admin errors are reported under `administrador.<field>`.
    pub fn validate_with(&self, public_domains: &PublicDomains) -> Result<(), FieldErrors> {
        let mut errors = self.organizacion.field_errors(public_domains);
        errors.extend_prefixed("administrador", self.administrador.field_errors());
        errors.into_result()
    }
}
