//! The response envelope: the wrapper every API response follows.

use serde::{Deserialize, Serialize};

use crate::EnvelopeError;

/// The `{success, message?, data?}` wrapper the insurance API puts around
/// every response body.
///
/// Think of it like a sealed delivery envelope: the outside tells you
/// whether the request worked (`success`) and optionally why not
/// (`message`); the payload (`data`) is inside. No caller should look at
/// `data` before checking `success` — that is exactly what
/// [`into_data`](Envelope::into_data) enforces.
///
/// `T` is the payload type for the endpoint in question. Endpoints that
/// return no payload (acknowledge-only, like the password reset requests)
/// use [`ack`](Envelope::ack) instead and never touch `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Did the server accept the request?
    pub success: bool,

    /// Human-readable explanation, usually present when `success` is
    /// false. This is the server's own wording and is surfaced to the
    /// user verbatim when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The endpoint-specific payload. `None` on failure, and sometimes
    /// (incorrectly) on success — which is why unwrapping is fallible.
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// `#[serde(default)]` on a generic field requires `T: Default`; this
/// free function sidesteps that bound — a missing `data` key is always
/// just `None`, whatever `T` is.
fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Unwraps the envelope into its payload.
    ///
    /// This is the shared validation discipline used by both the login
    /// flow and the recovery flow, in this exact order:
    ///
    /// 1. `success == false` → [`EnvelopeError::Rejected`], carrying the
    ///    server's message.
    /// 2. `success == true` but `data` absent → [`EnvelopeError::NoData`].
    ///
    /// # Errors
    /// See above — the two variants of [`EnvelopeError`].
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected {
                message: self.message,
            });
        }
        self.data.ok_or(EnvelopeError::NoData)
    }

    /// Checks only the `success` flag, ignoring the payload.
    ///
    /// Acknowledge-only endpoints (password reset) legitimately return
    /// an empty `data`, so step 2 of [`into_data`](Envelope::into_data)
    /// does not apply to them.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Rejected`] when `success` is false.
    pub fn ack(self) -> Result<(), EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected {
                message: self.message,
            });
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
