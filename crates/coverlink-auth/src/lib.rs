//! Authentication flows for Coverlink.
//!
//! This crate turns user input into session state:
//!
//! 1. **Login** — credentials in, validated session out, with a strictly
//!    ordered side-effect sequence: persist, signal, then navigate
//!    ([`AuthController::login`])
//! 2. **Logout** — explicit session teardown
//! 3. **Password recovery** — request a reset email, then consume the
//!    reset token; neither ever establishes a session
//!
//! # How it fits in the stack
//!
//! ```text
//! UI layer (above)         ← submits credentials, shows notices
//!     ↕
//! Auth Flow (this crate)   ← validates, persists, routes
//!     ↕
//! Gateway + Store (below)  ← carry the request, keep the session
//! ```

mod controller;
mod error;
mod notice;

pub use controller::{AuthConfig, AuthController, LoginOutcome};
pub use error::AuthError;
pub use notice::{Frontend, Notice, NoticeKind};
