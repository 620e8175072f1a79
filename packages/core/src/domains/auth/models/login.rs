use serde::{Deserialize, Serialize};

use crate::common::auth::Role;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Returned by login and organization signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub password_temporal: bool,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Body of `PUT /usuarios/me/password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    pub old_password: String,
    pub new_password: String,
}
