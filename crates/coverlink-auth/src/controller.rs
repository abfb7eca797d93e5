//! The authentication flow controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use coverlink_gateway::{ApiTransport, Gateway, Navigator};
use coverlink_protocol::{
    Envelope, LoginData, LoginRequest, ResetRequest, Role, Route,
    SubmitResetRequest,
};
use coverlink_store::{Session, SessionStore};

use crate::{AuthError, Frontend, Notice};

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

/// Configuration for the authentication flows.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long the success notice stays visible before the post-login
    /// navigation happens. A presentation affordance, not a correctness
    /// requirement: zero is valid and changes no invariant, because the
    /// session is durably written *before* the delay begins.
    pub notice_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            notice_delay: Duration::from_millis(1200),
        }
    }
}

// ---------------------------------------------------------------------------
// LoginOutcome
// ---------------------------------------------------------------------------

/// How a login attempt ended, short of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The attempt produced a validated, persisted session, and the
    /// application has been pointed at the role's home route.
    LoggedIn {
        session: Session,
        destination: Route,
    },

    /// A newer attempt started while this one was in flight, so this
    /// completion was ignored: no write, no navigation. The newer
    /// attempt owns the session now. Not an error — the caller simply
    /// does nothing with it.
    Superseded,
}

// ---------------------------------------------------------------------------
// AuthController
// ---------------------------------------------------------------------------

/// Turns credential submissions into session state.
///
/// One controller instance serves the whole application. It is one of
/// exactly two writers to the session store (the other being the
/// gateway's 401 eviction); everything else observes.
///
/// ## Double-submit guard
///
/// Concurrent login attempts (a user double-clicking submit) each run
/// independently, but a stale attempt that completes *after* a newer one
/// has started must not overwrite the newer session. Every call to
/// [`login`](Self::login) takes a ticket from a generation counter and
/// re-checks it after each await point: if the counter has moved on, the
/// completion becomes a no-op ([`LoginOutcome::Superseded`]).
pub struct AuthController<T: ApiTransport, N: Navigator, F: Frontend> {
    gateway: Arc<Gateway<T, N>>,
    store: SessionStore,
    navigator: Arc<N>,
    frontend: Arc<F>,
    config: AuthConfig,
    /// Generation counter for login attempts; see the type docs.
    attempt: AtomicU64,
}

impl<T: ApiTransport, N: Navigator, F: Frontend> AuthController<T, N, F> {
    /// Creates a controller over the shared gateway, store, and UI seams.
    pub fn new(
        gateway: Arc<Gateway<T, N>>,
        store: SessionStore,
        navigator: Arc<N>,
        frontend: Arc<F>,
        config: AuthConfig,
    ) -> Self {
        AuthController {
            gateway,
            store,
            navigator,
            frontend,
            config,
            attempt: AtomicU64::new(0),
        }
    }

    /// The session store this controller writes to.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Authenticates with the remote API and establishes a session.
    ///
    /// The validation sequence is strictly ordered and each failure
    /// short-circuits with its own [`AuthError`] variant:
    ///
    /// 1. call `POST /auth/login` through the gateway (transport and
    ///    status failures surface as [`AuthError::Gateway`]);
    /// 2. envelope `success` must be true ([`AuthError::Rejected`]);
    /// 3. envelope must carry a payload ([`AuthError::NoData`]);
    /// 4. payload must carry a token ([`AuthError::MissingToken`]);
    /// 5. payload must carry a role ([`AuthError::MissingRole`]);
    /// 6. role must normalize into the permitted set
    ///    ([`AuthError::InvalidRole`]).
    ///
    /// Only after all checks pass does anything get persisted, and the
    /// later side effects keep a strict order: **persist, then signal
    /// success, then (after the notice delay) navigate**. Navigation can
    /// never precede persistence, so the destination view always finds
    /// the session present.
    ///
    /// # Errors
    /// Any of the variants above; on every error path the session store
    /// is left untouched — there are no partial writes.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let ticket = self.attempt.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(ticket, "login attempt started");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let envelope: Envelope<LoginData> =
            self.gateway.post("/auth/login", &request).await?;

        let data = envelope.into_data()?;
        if data.access_token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        if data.role.is_empty() {
            return Err(AuthError::MissingRole);
        }
        let role = match Role::parse(&data.role) {
            Ok(role) => role,
            Err(_) => {
                return Err(AuthError::InvalidRole { value: data.role });
            }
        };

        if self.superseded(ticket) {
            tracing::debug!(ticket, "login superseded before persist; ignoring");
            return Ok(LoginOutcome::Superseded);
        }

        let session = Session {
            token: data.access_token,
            role,
            username: data.username,
            email: data.email,
        };
        self.store.write(session.clone());
        tracing::info!(%role, "login succeeded");

        self.frontend.notify(Notice::success("signed in successfully"));

        // Presentation delay so the notice is visible before the view
        // changes. The session is already durable at this point.
        let destination = role.home_route();
        tokio::time::sleep(self.config.notice_delay).await;

        if self.superseded(ticket) {
            // A newer attempt took over during the delay; its
            // navigation wins and ours becomes a no-op.
            tracing::debug!(ticket, "login superseded before navigation");
            return Ok(LoginOutcome::Superseded);
        }
        self.navigator.navigate(destination);

        Ok(LoginOutcome::LoggedIn {
            session,
            destination,
        })
    }

    /// Tears down the session and returns to the login route.
    ///
    /// Clearing is idempotent, so logging out while already logged out
    /// is harmless.
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("logged out");
        self.navigator.navigate(Route::Login);
    }

    /// Asks the API to send a password-reset email.
    ///
    /// Fire-and-acknowledge: success means the API accepted the request,
    /// not that the email was deliverable. No session is involved.
    ///
    /// # Errors
    /// [`AuthError::Gateway`] for transport/status failures,
    /// [`AuthError::Rejected`] when the envelope reports failure.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let request = ResetRequest {
            email: email.to_string(),
        };
        let envelope: Envelope<serde_json::Value> = self
            .gateway
            .post("/auth/password/reset-request", &request)
            .await?;
        envelope.ack()?;

        tracing::info!("password reset requested");
        self.frontend
            .notify(Notice::success("password reset email sent"));
        Ok(())
    }

    /// Consumes a reset token and sets the new password.
    ///
    /// The password pair is checked locally *before any network call*:
    /// both must be non-empty and equal, otherwise the flow fails with
    /// [`AuthError::Validation`] and the API is never contacted. On
    /// success no session is established — the user signs in through
    /// [`login`](Self::login) afterwards.
    ///
    /// # Errors
    /// [`AuthError::Validation`] locally; otherwise as
    /// [`request_password_reset`](Self::request_password_reset).
    pub async fn submit_password_reset(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.is_empty() || confirm_password.is_empty() {
            return Err(AuthError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        if new_password != confirm_password {
            return Err(AuthError::Validation(
                "passwords do not match".to_string(),
            ));
        }

        let request = SubmitResetRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        let envelope: Envelope<serde_json::Value> = self
            .gateway
            .post("/auth/password/reset", &request)
            .await?;
        envelope.ack()?;

        tracing::info!("password reset completed");
        self.frontend
            .notify(Notice::success("password updated, please sign in"));
        Ok(())
    }

    /// Has a newer attempt started since `ticket` was taken?
    fn superseded(&self, ticket: u64) -> bool {
        self.attempt.load(Ordering::SeqCst) != ticket
    }
}
