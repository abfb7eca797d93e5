//! Error types for the gateway layer.

/// Errors that can occur while sending a request through the gateway.
///
/// All of these are local, user-recoverable failures — none abort the
/// process. Only [`Unauthorized`](GatewayError::Unauthorized) carries a
/// side effect (session eviction), and that happens inside the gateway
/// before the error is returned.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response: DNS failure, refused
    /// connection, timeout. Carries the transport's own description.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server reported the session invalid (HTTP 401). By the time
    /// the caller sees this, the session store has been cleared and the
    /// redirect to the login route has been triggered.
    #[error("session rejected by server")]
    Unauthorized,

    /// Any other non-success status. Passed through to the caller
    /// unmodified — the gateway neither swallows nor retries it. When
    /// the body parsed as a response envelope, `message` carries the
    /// server's wording.
    #[error("server returned status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// A request body could not be serialized to JSON.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A success response body did not match the expected shape.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
