//! JSON API route handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::server::SharedState;
use crate::auth::{
    check_access_with, dashboard_route_for, ClientId, Decision, LoginRequest, LoginResponse,
    Role, SessionInfo,
};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub allowed: bool,
    pub redirect: Option<String>,
}

impl From<Decision> for AccessResponse {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Allow => Self {
                allowed: true,
                redirect: None,
            },
            Decision::Redirect(route) => Self {
                allowed: false,
                redirect: Some(route.path().to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Session routes

pub async fn get_session(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> impl IntoResponse {
    let session = state.sessions.session(client.as_str()).await;
    Json(ApiResponse::ok(SessionInfo::from(session)))
}

pub async fn login(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
    Json(req): Json<LoginRequest>,
) -> Response {
    state.login_delay().await;

    let role = Role::from_label(&req.role);
    match state
        .sessions
        .authenticate(client.as_str(), &state.identities, &req.email, &req.password, role)
        .await
    {
        Ok(session) => {
            let response = LoginResponse {
                redirect: dashboard_route_for(role).path().to_string(),
                session: session.into(),
            };
            (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
        }
        Err(e) => (e.status_code(), Json(ApiResponse::err(e.to_string()))).into_response(),
    }
}

pub async fn logout(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
) -> impl IntoResponse {
    state.sessions.logout(client.as_str()).await;
    tracing::info!("Client {} logged out", client.as_str());
    Json(ApiResponse::ok("logged out"))
}

pub async fn check_access(
    State(state): State<SharedState>,
    Extension(client): Extension<ClientId>,
    Query(query): Query<AccessQuery>,
) -> impl IntoResponse {
    let session = state.sessions.session(client.as_str()).await;
    let required = query.role.as_deref().map(Role::from_label);
    let decision = check_access_with(state.config.gate.policy, &session, required);
    Json(ApiResponse::ok(AccessResponse::from(decision)))
}
