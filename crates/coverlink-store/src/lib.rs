//! Persistent session state for Coverlink.
//!
//! This crate is the single source of truth for "who is logged in":
//!
//! 1. **Session** — the persisted identity record (token, role, profile
//!    strings)
//! 2. **SessionStore** — a clonable handle that keeps the in-memory copy
//!    and the on-disk copy in lockstep and broadcasts every change
//!
//! # How it fits in the stack
//!
//! ```text
//! Auth Flow (above)      ← writes on login, clears on logout
//! API Gateway (above)    ← reads the token, clears on 401
//!     ↕
//! Session Store (this crate)  ← one shared, observable Option<Session>
//!     ↕
//! Filesystem (below)     ← a small JSON file surviving restarts
//! ```
//!
//! Only the two components above ever mutate the store; everything else
//! subscribes read-only and reacts to change notifications.

mod session;
mod store;

pub use session::Session;
pub use store::SessionStore;
