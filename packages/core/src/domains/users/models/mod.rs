use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::auth::Role;
use crate::common::UserId;

/// User account as returned after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    pub email: String,
    pub nombre: String,
    pub apellidos: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    pub tipo_usuario: Role,
    #[serde(default)]
    pub activo: bool,
    #[serde(default)]
    pub password_temporal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_registro: Option<NaiveDateTime>,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellidos)
    }
}
