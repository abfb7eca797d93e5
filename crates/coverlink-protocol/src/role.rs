//! User roles and the navigation routes they gate.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The authenticated user's role.
///
/// The API reports roles as free-form strings in whatever casing the
/// backend happens to use (`"admin"`, `"Admin"`, `"ADMIN"`). This enum is
/// the *validated* form: once a value is a `Role`, it is by construction a
/// member of the permitted set, and its canonical (uppercase) spelling is
/// the only spelling that ever gets persisted.
///
/// Anything outside the set is a hard validation error
/// ([`ProtocolError::InvalidRole`]) — never stored, never acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Insurance agent.
    Agent,
    /// End customer.
    Customer,
}

impl Role {
    /// Parses a raw role string: uppercase-normalize, then check
    /// membership in the permitted set.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidRole`] carrying the *original*
    /// raw value (not the normalized one) for diagnostics.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "AGENT" => Ok(Role::Agent),
            "CUSTOMER" => Ok(Role::Customer),
            _ => Err(ProtocolError::InvalidRole {
                value: raw.to_string(),
            }),
        }
    }

    /// The canonical uppercase spelling — the only form ever persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Agent => "AGENT",
            Role::Customer => "CUSTOMER",
        }
    }

    /// The post-login destination for this role.
    ///
    /// A pure mapping with no fallback arm: an unknown role never
    /// becomes a `Role` in the first place, so there is nothing to
    /// fall back to.
    pub fn home_route(&self) -> Route {
        match self {
            Role::Admin => Route::AdminHome,
            Role::Agent => Route::AgentHome,
            Role::Customer => Route::CustomerHome,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes as the canonical uppercase string, so the persisted layout
/// and any outbound payloads always carry `"ADMIN"`/`"AGENT"`/`"CUSTOMER"`.
impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Deserializes through [`Role::parse`], so any casing on the wire is
/// accepted but an out-of-set value fails loudly.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A navigation destination within the application shell.
///
/// The session layer *computes* routes; it never implements navigation.
/// The UI layer receives one of these through the `Navigator` seam and
/// decides how to actually change the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The unauthenticated entry point. The gateway forces the app here
    /// when the server reports the session invalid.
    Login,
    /// Landing page for administrators.
    AdminHome,
    /// Landing page for agents.
    AgentHome,
    /// Landing page for customers.
    CustomerHome,
}

impl Route {
    /// The path string the UI router understands.
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::AdminHome => "/admin",
            Route::AgentHome => "/agent",
            Route::CustomerHome => "/customer",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

// =========================================================================
// Tests
// =========================================================================
