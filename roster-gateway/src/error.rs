//! Error types for the gateway crate.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::ValidationErrors;
use serde::Serialize;

/// Errors that can occur during gateway request handling.
///
/// Every variant renders as a JSON body of the form `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The creation payload failed schema validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No user is stored under the requested id. Carries the raw path text.
    #[error("User not found")]
    UserNotFound(String),

    /// The request body could not be read as JSON.
    #[error("invalid JSON body: {0}")]
    MalformedBody(String),

    /// No route matches the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// The path exists but does not accept the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::MalformedBody(rejection.body_text())
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody<T> {
    error: T,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Validation(_) | GatewayError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::UserNotFound(_) | GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        };
        match self {
            GatewayError::Validation(errors) => {
                (status, Json(ErrorBody { error: errors })).into_response()
            }
            other => (status, Json(ErrorBody { error: other.to_string() })).into_response(),
        }
    }
}
