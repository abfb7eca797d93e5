//! Unified error type for the Coverlink client.

use coverlink_auth::AuthError;
use coverlink_gateway::GatewayError;
use coverlink_protocol::ProtocolError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `coverlink` meta-crate, callers deal with this single
/// type instead of importing errors from each sub-crate; the `#[from]`
/// attributes let `?` convert automatically.
#[derive(Debug, thiserror::Error)]
pub enum CoverlinkError {
    /// A protocol-level error (envelope, role, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A gateway-level error (transport, status, unauthorized).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A flow-level error (login validation, recovery preconditions).
    #[error(transparent)]
    Auth(#[from] AuthError),
}
