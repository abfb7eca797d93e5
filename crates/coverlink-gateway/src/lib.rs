//! Outbound request pipeline for Coverlink.
//!
//! Every call to the remote insurance API goes through one place — the
//! [`Gateway`] — which does three things for every request, no
//! exceptions:
//!
//! 1. reads the current bearer token from the session store and attaches
//!    it as an `Authorization` header when present;
//! 2. hands the request to a pluggable [`ApiTransport`];
//! 3. inspects the response, evicting the session and forcing the app
//!    back to the login route when the server reports it invalid.
//!
//! The transport is a trait so the production HTTP implementation
//! ([`HttpTransport`], reqwest-backed, behind the default-on `http`
//! feature) and the scripted in-memory transports used in tests plug
//! into the exact same pipeline.
//!
//! # Feature Flags
//!
//! - `http` (default) — reqwest-backed [`HttpTransport`]

#![allow(async_fn_in_trait)]

mod error;
mod gateway;
#[cfg(feature = "http")]
mod http;

pub use error::GatewayError;
pub use gateway::Gateway;
#[cfg(feature = "http")]
pub use http::HttpTransport;

use coverlink_protocol::Route;

// ---------------------------------------------------------------------------
// Transport seam
// ---------------------------------------------------------------------------

/// HTTP method of an outbound request. The auth surface only ever needs
/// these two; extending is a one-line change per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully described outbound request, transport-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/auth/login`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
    /// Bearer credential to attach, already read from the store by the
    /// gateway. Transports attach it verbatim and never invent one.
    pub bearer: Option<String>,
}

/// An undecoded response: status plus raw body bytes.
///
/// Kept raw so the gateway owns all interpretation — status
/// classification and body decoding happen in one place, not per
/// transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes requests against the remote API.
///
/// `Send + Sync + 'static` because the gateway is shared across async
/// tasks and lives as long as the application.
pub trait ApiTransport: Send + Sync + 'static {
    /// Performs the request and returns the raw response.
    ///
    /// # Errors
    /// Returns [`GatewayError::Transport`] when the request could not
    /// reach the API at all (DNS, refused connection, timeout). A
    /// response with a non-success status is *not* a transport error —
    /// it comes back as a `RawResponse` for the gateway to classify.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, GatewayError>;
}

impl<T: ApiTransport> ApiTransport for std::sync::Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, GatewayError> {
        (**self).execute(request).await
    }
}

// ---------------------------------------------------------------------------
// Navigation seam
// ---------------------------------------------------------------------------

/// The navigation surface the session layer drives but does not
/// implement.
///
/// The gateway calls this with [`Route::Login`] on session eviction; the
/// auth flow calls it with the role's home route after login. The UI
/// layer decides what "navigate" actually means. Implementations must be
/// infallible no-ops at worst — a discarded view navigating nowhere is
/// fine, a panic is not.
pub trait Navigator: Send + Sync + 'static {
    /// Moves the application to the given route.
    fn navigate(&self, route: Route);
}
