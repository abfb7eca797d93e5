//! Error types for the protocol layer.
//!
//! Each crate in Coverlink defines its own error enum. This keeps errors
//! specific and meaningful — when you see a `ProtocolError`, you know the
//! problem is in the shape of the data, not in networking or persistence.

/// Errors produced while unwrapping a response [`Envelope`](crate::Envelope).
///
/// These two cases are shared between the login flow and the password
/// recovery flow — every API response goes through the same envelope
/// discipline before its payload is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// The server set `success: false`. Carries the server-supplied
    /// message when one was present, because that message is what the
    /// user should ultimately see.
    #[error("request rejected by server: {}", .message.as_deref().unwrap_or("(no message)"))]
    Rejected {
        /// The `message` field of the envelope, verbatim.
        message: Option<String>,
    },

    /// The server set `success: true` but sent no `data` payload.
    /// A successful response with nothing inside is a contract violation
    /// for any endpoint that promises a payload.
    #[error("no data in successful response")]
    NoData,
}

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Unwrapping an envelope failed (rejected, or payload missing).
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// A role string outside the enumerated set. Carries the offending
    /// raw value for diagnostics — the validator never guesses, and an
    /// unrecognized role must never be persisted.
    #[error("invalid role: {value:?}")]
    InvalidRole {
        /// The raw value as received, before normalization.
        value: String,
    },

    /// Deserialization failed (malformed JSON, wrong field types).
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
