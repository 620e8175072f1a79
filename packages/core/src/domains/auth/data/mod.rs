use crate::domains::auth::models::{LoginRequest, PasswordUpdate};
use crate::domains::validation::{is_valid_password, FieldErrors};

/// Login form check: both fields must be present.
pub fn validate_login(request: &LoginRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("email", &request.email, "El email es obligatorio");
    errors.require("password", &request.password, "La contraseña es obligatoria");
    errors.into_result()
}

/// Password change form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require(
            "oldPassword",
            &self.old_password,
            "La contraseña actual es obligatoria",
        );

        if self.new_password.is_empty() {
            errors.add("newPassword", "La nueva contraseña es obligatoria");
        } else if !is_valid_password(&self.new_password) {
            errors.add(
                "newPassword",
                "La contraseña debe tener al menos 8 caracteres",
            );
        } else if self.new_password == self.old_password {
            errors.add(
                "newPassword",
                "La nueva contraseña debe ser diferente de la actual",
            );
        }

        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Debe confirmar la contraseña");
        } else if self.new_password != self.confirm_password {
            errors.add("confirmPassword", "Las contraseñas no coinciden");
        }

        errors.into_result()
    }

    pub fn to_update(&self) -> PasswordUpdate {
        PasswordUpdate {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(old: &str, new: &str, confirm: &str) -> PasswordChange {
        PasswordChange {
            old_password: old.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_change() {
        assert!(form("Temporal123", "NuevaClave1", "NuevaClave1").validate().is_ok());
    }

    #[test]
    fn test_short_new_password() {
        let errors = form("Temporal123", "corta", "corta").validate().unwrap_err();
        assert_eq!(
            errors.get("newPassword"),
            Some("La contraseña debe tener al menos 8 caracteres")
        );
    }

    #[test]
    fn test_same_as_old_rejected() {
        let errors = form("Temporal123", "Temporal123", "Temporal123")
            .validate()
            .unwrap_err();
        assert!(errors.contains("newPassword"));
    }

    #[test]
    fn test_confirmation_mismatch() {
        let errors = form("Temporal123", "NuevaClave1", "NuevaClave2")
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some("Las contraseñas no coinciden"));
        assert!(!errors.contains("newPassword"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login(&LoginRequest::new("  ", "")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(validate_login(&LoginRequest::new("a@b.es", "x")).is_ok());
    }
}
