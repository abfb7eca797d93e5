//! Request and response payloads for the auth endpoints.
//!
//! The wire format is camelCase JSON (the API's convention); field names
//! here follow Rust convention and are renamed by serde.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login envelope.
///
/// Only `accessToken` and `role` are load-bearing; `username` and `email`
/// are descriptive and default to the empty string when the server omits
/// them. `accessToken` and `role` also default to empty rather than
/// failing deserialization — their absence is a *flow* error with its own
/// taxonomy (missing token / missing role), not a decode error, so the
/// flow layer must get a chance to see the empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[serde(default)]
    pub access_token: String,

    /// Raw role string exactly as the server sent it. Validation and
    /// normalization happen in the flow layer via
    /// [`Role::parse`](crate::Role::parse), never here.
    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,
}

/// Body of the "request a password reset" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// Body of `POST /auth/password/reset` — consumes the emailed reset token
/// and sets the new password. The confirm-password check is a local
/// precondition in the flow layer and never travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResetRequest {
    pub token: String,
    pub new_password: String,
}

// =========================================================================
// Tests
// =========================================================================
