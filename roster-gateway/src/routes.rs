//! Axum route handlers for the Roster user API.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use roster_core::{validate_new_user, User, UserId};
use serde::Serialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::debug;

use crate::{error::GatewayError, health::HealthReporter, store::UserStore};

/// Service name reported by `GET /`.
pub const SERVICE_NAME: &str = "roster";

/// Every route the service answers, as reported by `GET /`.
pub const ENDPOINTS: [&str; 6] = [
    "GET /",
    "GET /health",
    "GET /api/users",
    "GET /api/users/:id",
    "POST /api/users",
    "DELETE /api/users/:id",
];

// ── Shared state ─────────────────────────────────────────────────────────────

/// Process-wide state handed to every handler.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: Arc<UserStore>,
    pub health: Arc<HealthReporter>,
}

impl AppState {
    /// Fresh, empty state with the uptime clock started now.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

/// Body of `GET /api/users`.
#[derive(Debug, Serialize)]
pub struct UserList {
    pub count: usize,
    pub data: Vec<User>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over `state`, rejecting bodies larger than
/// `body_limit` bytes.
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user).delete(delete_user))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — service name, version and endpoint list.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: &ENDPOINTS,
    })
}

/// `GET /health` — liveness probe with uptime and memory snapshot.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.health.report()))
}

/// `GET /api/users` — every stored user in creation order.
pub async fn list_users(State(state): State<AppState>) -> Json<UserList> {
    let data = state.store.list();
    Json(UserList { count: data.len(), data })
}

/// `GET /api/users/:id` — fetch one user.
///
/// # Errors
/// Returns [`GatewayError::UserNotFound`] if the id is not an integer or no
/// user has it.
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, GatewayError> {
    let id = parse_id(&raw_id)?;
    let user = state.store.get_by_id(id).inspect_err(|_| {
        debug!(user_id = %id, "lookup miss");
    })?;
    Ok(Json(user))
}

/// `POST /api/users` — validate the payload and store a new user.
///
/// # Errors
/// Returns [`GatewayError::MalformedBody`] if the body is not JSON, or
/// [`GatewayError::Validation`] listing every invalid field. Nothing is
/// stored in either case.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(payload) = payload?;
    let new_user = validate_new_user(&payload).inspect_err(|errors| {
        debug!(issues = errors.issues().len(), "rejected user payload");
    })?;
    let user = state.store.create(new_user);
    Ok((StatusCode::CREATED, Json(user)))
}

/// `DELETE /api/users/:id` — remove a user.
///
/// # Errors
/// Returns [`GatewayError::UserNotFound`] if the id is not an integer or no
/// user has it.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id = parse_id(&raw_id)?;
    state.store.delete_by_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn route_not_found() -> GatewayError {
    GatewayError::RouteNotFound
}

async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

fn parse_id(raw: &str) -> Result<UserId, GatewayError> {
    raw.parse().map_err(|_| {
        debug!(raw_id = raw, "non-integer user id");
        GatewayError::UserNotFound(raw.to_owned())
    })
}
