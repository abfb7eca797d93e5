//! The session record: the only entity this client ever persists.

use coverlink_protocol::Role;
use serde::{Deserialize, Serialize};

/// The authenticated identity state held by the client.
///
/// Created by the auth flow on a successful login, overwritten by every
/// later successful login, deleted on logout or when the server reports
/// the session invalid. Its *absence* is the canonical "logged out"
/// state — there is no separate flag.
///
/// The persisted JSON layout uses the exact key names the rest of the
/// platform expects: `token`, `userRole`, `username`, `email`. The role
/// is typed — an out-of-set role cannot be represented here, so an
/// unvalidated role can never reach disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential. Presence of a session implies presence
    /// of a token; the store never holds a token-less session.
    pub token: String,

    /// Validated, normalized role. Serialized as the canonical uppercase
    /// string under the `userRole` key.
    #[serde(rename = "userRole")]
    pub role: Role,

    /// Display name; empty string when the server did not provide one.
    /// Never used for authorization decisions.
    #[serde(default)]
    pub username: String,

    /// Contact address; empty string when unavailable. Descriptive only.
    #[serde(default)]
    pub email: String,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_layout_uses_expected_keys() {
        let session = Session {
            token: "t1".into(),
            role: Role::Agent,
            username: "jo".into(),
            email: "jo@x.com".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&session).unwrap();

        assert_eq!(json["token"], "t1");
        assert_eq!(json["userRole"], "AGENT");
        assert_eq!(json["username"], "jo");
        assert_eq!(json["email"], "jo@x.com");
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let session = Session {
            token: "t2".into(),
            role: Role::Customer,
            username: String::new(),
            email: String::new(),
        };
        let bytes = serde_json::to_vec(&session).unwrap();
        let decoded: Session = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(session, decoded);
    }

    #[test]
    fn test_deserialize_accepts_lowercase_persisted_role() {
        // Older persisted files may carry a lowercase role; the typed
        // Role normalizes on the way in.
        let session: Session = serde_json::from_str(
            r#"{"token": "t", "userRole": "admin"}"#,
        )
        .unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.username, "");
    }

    #[test]
    fn test_deserialize_rejects_out_of_set_role() {
        // A tampered or corrupt file with an invalid role must not load.
        let result: Result<Session, _> = serde_json::from_str(
            r#"{"token": "t", "userRole": "SUPERADMIN"}"#,
        );
        assert!(result.is_err());
    }
}
