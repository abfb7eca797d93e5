//! Error taxonomy for the authentication flows.

use coverlink_gateway::GatewayError;
use coverlink_protocol::EnvelopeError;

/// Everything that can go wrong in a login or recovery flow.
///
/// Each validation step of the login sequence short-circuits with its
/// own variant, in order: transport/status → envelope rejected → payload
/// missing → token missing → role missing → role invalid. All variants
/// are local, user-recoverable errors — they are caught at the flow
/// boundary and shown as a message ([`user_message`](AuthError::user_message)),
/// never allowed to escape as a panic.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request failed below the envelope level: transport failure,
    /// non-success HTTP status, or an unauthorized response (which has
    /// already evicted the session by the time this surfaces).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The envelope came back with `success: false`. Carries the
    /// server-supplied message — the preferred wording for the user.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("(no message)"))]
    Rejected { message: Option<String> },

    /// Envelope succeeded but the payload was absent.
    #[error("no authentication data")]
    NoData,

    /// The payload carried no access token.
    #[error("no access token in response")]
    MissingToken,

    /// The payload carried no role.
    #[error("no role in response")]
    MissingRole,

    /// The role was present but outside the permitted set. Carries the
    /// offending raw value; nothing has been persisted.
    #[error("invalid role: {value:?}")]
    InvalidRole { value: String },

    /// A local precondition failed before any network call was made
    /// (recovery flow: empty or mismatched passwords).
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Fallback wording when neither the server nor the status code offers
/// anything better.
const GENERIC_MESSAGE: &str = "something went wrong, please try again";

impl AuthError {
    /// The message to show the user.
    ///
    /// Preference order: the server's own message, then a
    /// status-specific default (unauthorized → "invalid email or
    /// password", 5xx → "server error, try again later"), then a
    /// generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected { message: Some(m) } if !m.is_empty() => m.clone(),
            AuthError::Validation(m) => m.clone(),
            AuthError::Gateway(GatewayError::Unauthorized) => {
                "invalid email or password".to_string()
            }
            AuthError::Gateway(GatewayError::Status {
                message: Some(m), ..
            }) if !m.is_empty() => m.clone(),
            AuthError::Gateway(GatewayError::Status { status, .. })
                if (500..600).contains(status) =>
            {
                "server error, try again later".to_string()
            }
            _ => GENERIC_MESSAGE.to_string(),
        }
    }
}

/// The shared envelope discipline maps straight onto the flow taxonomy.
impl From<EnvelopeError> for AuthError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected { message } => AuthError::Rejected { message },
            EnvelopeError::NoData => AuthError::NoData,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_wording() {
        let err = AuthError::Rejected {
            message: Some("bad creds".into()),
        };
        assert_eq!(err.user_message(), "bad creds");
    }

    #[test]
    fn test_user_message_unauthorized_default() {
        let err = AuthError::Gateway(GatewayError::Unauthorized);
        assert_eq!(err.user_message(), "invalid email or password");
    }

    #[test]
    fn test_user_message_server_status_with_message() {
        let err = AuthError::Gateway(GatewayError::Status {
            status: 500,
            message: Some("database down".into()),
        });
        assert_eq!(err.user_message(), "database down");
    }

    #[test]
    fn test_user_message_server_range_default() {
        let err = AuthError::Gateway(GatewayError::Status {
            status: 503,
            message: None,
        });
        assert_eq!(err.user_message(), "server error, try again later");
    }

    #[test]
    fn test_user_message_generic_fallback() {
        assert_eq!(AuthError::NoData.user_message(), GENERIC_MESSAGE);
        assert_eq!(AuthError::MissingToken.user_message(), GENERIC_MESSAGE);
        let rejected_blank = AuthError::Rejected {
            message: Some(String::new()),
        };
        assert_eq!(rejected_blank.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_user_message_validation_passthrough() {
        let err = AuthError::Validation("passwords do not match".into());
        assert_eq!(err.user_message(), "passwords do not match");
    }

    #[test]
    fn test_from_envelope_error_mapping() {
        let rejected: AuthError = EnvelopeError::Rejected {
            message: Some("no".into()),
        }
        .into();
        assert!(matches!(rejected, AuthError::Rejected { .. }));

        let no_data: AuthError = EnvelopeError::NoData.into();
        assert!(matches!(no_data, AuthError::NoData));
    }
}
