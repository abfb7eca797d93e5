//! Shared API vocabulary for Coverlink.
//!
//! This crate defines every type that crosses the wire between the client
//! and the insurance-management API, plus the two small enums the rest of
//! the client is built around:
//!
//! 1. **Envelope** — the `{success, message?, data?}` wrapper every API
//!    response follows ([`Envelope`])
//! 2. **Role** — the validated, normalized user role ([`Role`])
//! 3. **Route** — the navigation destinations the role gates ([`Route`])
//! 4. **Payloads** — the request/response bodies for the auth endpoints
//!
//! # How it fits in the stack
//!
//! ```text
//! Auth Flow / Gateway (above)  ← validate envelopes, parse roles
//!     ↕
//! Protocol Layer (this crate)  ← provides Envelope, Role, Route, payloads
//!     ↕
//! Remote API (below)           ← speaks JSON matching these shapes
//! ```

mod envelope;
mod error;
mod payload;
mod role;

pub use envelope::Envelope;
pub use error::{EnvelopeError, ProtocolError};
pub use payload::{LoginData, LoginRequest, ResetRequest, SubmitResetRequest};
pub use role::{Role, Route};
