//! REST surface of the auth backend.
//!
//! `AuthApi` is the seam between the store and the transport: the browser
//! build talks through `gloo-net`, native builds through reqwest, and tests
//! through scripted fakes.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses keep the server's `message` and per-field `errors` so
//! the store can surface the backend's own wording instead of a generic one.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::collections::BTreeMap;

use super::types::{AuthResponse, ErrorBody, LoginRequest, RegisterRequest, User};

pub const REGISTER_PATH: &str = "/register";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const USER_PATH: &str = "/user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
        errors: BTreeMap<String, Vec<String>>,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("no http transport available on this target")]
    Unavailable,
}

impl ApiError {
    /// Human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    /// Per-field validation errors (empty unless the server sent them).
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Status { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Async client for the four auth endpoints.
///
/// `token` parameters carry the current session token, replayed as a bearer
/// credential when present.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /register`.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /login`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /logout`. The response body is ignored.
    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError>;

    /// `GET /user`, unwrapping the `{ "user": ... }` envelope.
    async fn fetch_user(&self, token: Option<&str>) -> Result<User, ApiError>;
}

/// `Authorization` header value for a session token.
pub(crate) fn bearer_header(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(|t| format!("Bearer {t}"))
}

/// Build an `ApiError::Status` from a non-2xx response body.
pub(crate) fn status_error(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    ApiError::Status { status, message: parsed.message, errors: parsed.errors }
}

/// Decode a 2xx response body.
pub(crate) fn decode_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
