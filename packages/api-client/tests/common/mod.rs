//! In-process fake of the ALMA backend for the REST client tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alma_api_client::{AlmaClient, ClientConfig};
use alma_core::common::auth::Role;
use alma_core::kernel::test_dependencies::MemoryCredentialStore;
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const PASSWORD: &str = "Secreta1!";
pub const LOCKED_EMAIL: &str = "bloqueado@alma.es";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

pub struct FakeState {
    pub health_status: StatusCode,
    pub requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeBackend {
    /// Includes the `/api` prefix.
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn spawn() -> Self {
        Self::spawn_with_health(StatusCode::OK).await
    }

    pub async fn spawn_with_health(health_status: StatusCode) -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            health_status,
            requests: Vec::new(),
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }

    pub fn health_probes(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path == "/api/health")
            .count()
    }

    /// Client pinned to this backend with an empty credential store.
    pub fn client(&self) -> (AlmaClient, Arc<MemoryCredentialStore>) {
        self.client_with(MemoryCredentialStore::new())
    }

    pub fn signed_in_client(&self, email: &str, role: Role) -> (AlmaClient, Arc<MemoryCredentialStore>) {
        self.client_with(MemoryCredentialStore::new().signed_in(email, role))
    }

    fn client_with(&self, store: MemoryCredentialStore) -> (AlmaClient, Arc<MemoryCredentialStore>) {
        let store = Arc::new(store);
        let config = ClientConfig::default().with_base_url(self.base_url.clone());
        let client = AlmaClient::new(&config, store.clone()).unwrap();
        (client, store)
    }
}

/// Address nothing listens on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn organization_json(id: i64, estado: &str) -> Value {
    json!({
        "id": id,
        "cif": format!("B{:08}", id),
        "nombreOficial": format!("Centro {}", id),
        "emailCorporativo": format!("info{}@centro.es", id),
        "estadoVerificacion": "VERIFICADA",
        "estado": estado,
        "fechaRegistro": "2025-01-10T09:30:00"
    })
}

fn audit_json(id: i64) -> Value {
    json!({
        "id": id,
        "tipoAccion": "SUSPENDER_ORGANIZACION",
        "tablaAfectada": "ORGANIZACION",
        "idRegistroAfectado": 1,
        "datosAnteriores": {"ESTADO": "ACTIVA"},
        "datosNuevos": {"ESTADO": "SUSPENDIDA"},
        "motivo": "Impago",
        "fechaAccion": "2025-02-01T12:00:00",
        "emailAdmin": "superadmin@alma.es"
    })
}

pub fn assignment_json(id: i64, professional: i64, patient: i64, activa: bool) -> Value {
    json!({
        "id": id,
        "profesional": {
            "id": professional,
            "usuario": {
                "id": 100 + professional,
                "email": "psi@centro.es",
                "nombre": "Ana",
                "apellidos": "Ruiz",
                "tipoUsuario": "PROFESIONAL",
                "activo": true
            },
            "numeroColegiado": "M-12345"
        },
        "paciente": {
            "id": patient,
            "usuario": {
                "id": 200 + patient,
                "email": "pac@centro.es",
                "nombre": "Marta",
                "apellidos": "López",
                "tipoUsuario": "PACIENTE",
                "activo": true
            },
            "genero": "FEMENINO"
        },
        "fechaAsignacion": "2025-03-01T10:00:00",
        "activa": activa,
        "esPrincipal": false
    })
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({
        "timestamp": "2025-02-01T12:00:00",
        "status": 200,
        "message": "OK",
        "data": data
    }))
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": status.canonical_reason(), "message": message}))).into_response()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register-organization", post(register_organization))
        .route("/api/usuarios/me/password", put(|| async { StatusCode::OK }))
        .route("/api/organizaciones", post(create_organization))
        .route("/api/organizaciones/:id", get(get_organization))
        .route("/api/organizaciones/:id/cambiar-estado", put(change_state))
        .route("/api/organizaciones/:id/auditoria", get(organization_audit))
        .route("/api/organizaciones/estado/:estado", get(by_state))
        .route("/api/organizaciones/auditoria/recientes", get(recent_audit))
        .route("/api/asignaciones", post(create_assignment))
        .route("/api/asignaciones/paciente/:id", get(patient_assignments))
        .route("/api/asignaciones/profesional/:id", get(professional_assignments))
        .route("/api/asignaciones/:id/deactivate", put(deactivate_assignment))
        .route("/api/asignaciones/:id", delete(delete_assignment))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let (authorization, content_type) = {
        let header_value = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        (
            header_value(header::AUTHORIZATION),
            header_value(header::CONTENT_TYPE),
        )
    };
    state.lock().unwrap().requests.push(RecordedRequest {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        authorization,
        content_type,
    });
    next.run(request).await
}

async fn health(State(state): State<Shared>) -> StatusCode {
    state.lock().unwrap().health_status
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if email == LOCKED_EMAIL {
        return error(StatusCode::LOCKED, "Cuenta bloqueada por intentos fallidos");
    }
    if body["password"].as_str() != Some(PASSWORD) {
        return error(StatusCode::UNAUTHORIZED, "Credenciales inválidas");
    }
    envelope(json!({
        "access_token": format!("jwt-{}", email),
        "token_type": "Bearer",
        "email": email,
        "role": "SUPER_ADMIN",
        "password_temporal": false
    }))
    .into_response()
}

async fn register_organization(Json(body): Json<Value>) -> Json<Value> {
    // bare body, no envelope
    Json(json!({
        "access_token": "jwt-new-admin",
        "email": body["administrador"]["email"],
        "role": "ADMIN_ORGANIZACION",
        "password_temporal": false
    }))
}

async fn create_organization() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal failure").into_response()
}

async fn get_organization(Path(id): Path<i64>) -> Response {
    if id == 1 {
        Json(organization_json(1, "ACTIVA")).into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Organización no encontrada")
    }
}

async fn change_state(
    Path(id): Path<i64>,
    request: Request,
) -> Response {
    if request.headers().get(header::AUTHORIZATION).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Token requerido");
    }
    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let estado = body["nuevoEstado"].as_str().unwrap_or_default();
    envelope(organization_json(id, estado)).into_response()
}

async fn organization_audit() -> Response {
    error(StatusCode::FORBIDDEN, "Acceso denegado")
}

async fn by_state(Path(estado): Path<String>) -> Json<Value> {
    Json(json!([organization_json(4, &estado), organization_json(5, &estado)]))
}

async fn recent_audit(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: i64 = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(0);
    envelope(Value::Array((1..=limit).rev().map(audit_json).collect()))
}

async fn create_assignment(Json(body): Json<Value>) -> Response {
    let professional = body["profesionalId"].as_i64().unwrap_or_default();
    let patient = body["pacienteId"].as_i64().unwrap_or_default();
    if patient == 99 {
        return error(StatusCode::NOT_FOUND, "Profesional o paciente no encontrado.");
    }
    let mut assignment = assignment_json(7, professional, patient, true);
    assignment["esPrincipal"] = body["esPrincipal"].clone();
    (StatusCode::CREATED, envelope(assignment)).into_response()
}

async fn patient_assignments(Path(id): Path<i64>) -> Json<Value> {
    // bare list
    Json(json!([assignment_json(1, 10, id, true), assignment_json(2, 11, id, false)]))
}

async fn professional_assignments(Path(id): Path<i64>) -> Json<Value> {
    envelope(json!([assignment_json(1, id, 20, true)]))
}

async fn deactivate_assignment(Path(id): Path<i64>) -> Json<Value> {
    envelope(assignment_json(id, 10, 20, false))
}

async fn delete_assignment(Path(id): Path<i64>) -> Response {
    if id == 1 {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Asignación no encontrada.")
    }
}
