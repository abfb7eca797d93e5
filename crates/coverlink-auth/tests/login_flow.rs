//! Integration tests for the authentication flows, run against a
//! scripted in-memory transport.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use coverlink_auth::{
    AuthConfig, AuthController, AuthError, Frontend, LoginOutcome, Notice,
    NoticeKind,
};
use coverlink_gateway::{
    ApiRequest, ApiTransport, Gateway, GatewayError, Navigator, RawResponse,
};
use coverlink_protocol::{Role, Route};
use coverlink_store::SessionStore;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::oneshot;

// =========================================================================
// Test doubles
// =========================================================================

/// One scripted exchange: an optional gate the transport waits on before
/// answering (for races), then the response.
struct Step {
    gate: Option<oneshot::Receiver<()>>,
    response: RawResponse,
}

/// Replays a scripted queue of responses and records every request.
struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn new() -> Arc<Self> {
        Arc::new(ScriptedTransport {
            steps: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn push(&self, status: u16, body: serde_json::Value) {
        self.steps.lock().push_back(Step {
            gate: None,
            response: RawResponse {
                status,
                body: body.to_string().into_bytes(),
            },
        });
    }

    /// Pushes a response that is withheld until the returned sender
    /// fires. Lets a test hold one request in flight while another runs.
    fn push_gated(
        &self,
        status: u16,
        body: serde_json::Value,
    ) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.steps.lock().push_back(Step {
            gate: Some(gate),
            response: RawResponse {
                status,
                body: body.to_string().into_bytes(),
            },
        });
        release
    }

    fn seen(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }
}

impl ApiTransport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, GatewayError> {
        self.requests.lock().push(request);
        let step = self.steps.lock().pop_front();
        let step = step.expect("transport script exhausted");
        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        Ok(step.response)
    }
}

struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    fn new() -> Arc<Self> {
        Arc::new(RecordingNavigator {
            routes: Mutex::new(Vec::new()),
        })
    }

    fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

struct RecordingFrontend {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingFrontend {
    fn new() -> Arc<Self> {
        Arc::new(RecordingFrontend {
            notices: Mutex::new(Vec::new()),
        })
    }

    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Frontend for RecordingFrontend {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// The full harness: transport + store + navigator + frontend wired into
/// a controller with a zero notice delay (the delay is presentation
/// only; tests assert the ordering, not the wall clock).
struct Harness {
    transport: Arc<ScriptedTransport>,
    store: SessionStore,
    navigator: Arc<RecordingNavigator>,
    frontend: Arc<RecordingFrontend>,
    controller: Arc<
        AuthController<Arc<ScriptedTransport>, RecordingNavigator, RecordingFrontend>,
    >,
}

fn harness() -> Harness {
    let transport = ScriptedTransport::new();
    let store = SessionStore::in_memory();
    let navigator = RecordingNavigator::new();
    let frontend = RecordingFrontend::new();
    let gateway = Arc::new(Gateway::new(
        Arc::clone(&transport),
        store.clone(),
        Arc::clone(&navigator),
    ));
    let controller = Arc::new(AuthController::new(
        gateway,
        store.clone(),
        Arc::clone(&navigator),
        Arc::clone(&frontend),
        AuthConfig {
            notice_delay: Duration::ZERO,
        },
    ));
    Harness {
        transport,
        store,
        navigator,
        frontend,
        controller,
    }
}

fn login_ok_body(token: &str, role: &str) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "accessToken": token,
            "role": role,
            "username": "jo",
            "email": "jo@x.com"
        }
    })
}

// =========================================================================
// login — happy paths
// =========================================================================

#[tokio::test]
async fn test_login_valid_agent_persists_and_routes_to_agent_home() {
    let h = harness();
    h.transport.push(200, login_ok_body("t1", "agent"));

    let outcome = h.controller.login("a@b.com", "pw").await.unwrap();

    // Lowercase "agent" normalizes to the canonical AGENT.
    let session = h.store.read().expect("session should be persisted");
    assert_eq!(session.token, "t1");
    assert_eq!(session.role, Role::Agent);
    assert_eq!(session.username, "jo");
    assert_eq!(session.email, "jo@x.com");

    assert!(matches!(
        outcome,
        LoginOutcome::LoggedIn { destination: Route::AgentHome, .. }
    ));
    assert_eq!(h.navigator.routes(), vec![Route::AgentHome]);
}

#[tokio::test]
async fn test_login_destination_follows_fixed_role_mapping() {
    for (role, expected) in [
        ("ADMIN", Route::AdminHome),
        ("agent", Route::AgentHome),
        ("Customer", Route::CustomerHome),
    ] {
        let h = harness();
        h.transport.push(200, login_ok_body("t", role));

        let outcome = h.controller.login("a@b.com", "pw").await.unwrap();

        assert!(
            matches!(outcome, LoginOutcome::LoggedIn { destination, .. }
                if destination == expected),
            "role={role:?}"
        );
        assert_eq!(h.navigator.routes(), vec![expected], "role={role:?}");
    }
}

#[tokio::test]
async fn test_login_emits_success_notice_before_navigation() {
    let h = harness();
    h.transport.push(200, login_ok_body("t1", "admin"));

    h.controller.login("a@b.com", "pw").await.unwrap();

    let notices = h.frontend.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
}

#[tokio::test]
async fn test_login_sends_credentials_to_login_endpoint() {
    let h = harness();
    h.transport.push(200, login_ok_body("t1", "admin"));

    h.controller.login("a@b.com", "pw").await.unwrap();

    let seen = h.transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/auth/login");
    assert_eq!(
        seen[0].body,
        Some(json!({"email": "a@b.com", "password": "pw"}))
    );
}

#[tokio::test]
async fn test_second_login_overwrites_previous_session() {
    let h = harness();
    h.transport.push(200, login_ok_body("t1", "agent"));
    h.transport.push(200, login_ok_body("t2", "admin"));

    h.controller.login("a@b.com", "pw").await.unwrap();
    h.controller.login("b@c.com", "pw").await.unwrap();

    let session = h.store.read().unwrap();
    assert_eq!(session.token, "t2");
    assert_eq!(session.role, Role::Admin);
}

// =========================================================================
// login — each validation step short-circuits distinctly
// =========================================================================

#[tokio::test]
async fn test_login_rejected_envelope_surfaces_server_message() {
    let h = harness();
    h.transport
        .push(200, json!({"success": false, "message": "bad creds"}));

    let err = h.controller.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected { .. }));
    assert_eq!(err.user_message(), "bad creds");
    // Store untouched, no navigation.
    assert_eq!(h.store.read(), None);
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_login_success_without_data_is_no_data_error() {
    let h = harness();
    h.transport.push(200, json!({"success": true}));

    let err = h.controller.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::NoData));
    assert_eq!(h.store.read(), None);
}

#[tokio::test]
async fn test_login_missing_token_short_circuits() {
    let h = harness();
    h.transport.push(
        200,
        json!({"success": true, "data": {"role": "agent"}}),
    );

    let err = h.controller.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::MissingToken));
    assert_eq!(h.store.read(), None);
}

#[tokio::test]
async fn test_login_missing_role_short_circuits() {
    let h = harness();
    h.transport.push(
        200,
        json!({"success": true, "data": {"accessToken": "t1"}}),
    );

    let err = h.controller.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::MissingRole));
    assert_eq!(h.store.read(), None);
}

#[tokio::test]
async fn test_login_invalid_role_names_offending_value_and_leaves_store_unmodified() {
    let h = harness();
    h.transport.push(200, login_ok_body("t1", "SUPERADMIN"));

    let err = h.controller.login("a@b.com", "pw").await.unwrap_err();

    assert!(
        matches!(err, AuthError::InvalidRole { ref value } if value == "SUPERADMIN")
    );
    // No partial write: the token was valid but the role was not, and
    // nothing may be persisted unless everything validates.
    assert_eq!(h.store.read(), None);
    assert!(h.navigator.routes().is_empty());
    assert!(h.frontend.notices().is_empty());
}

#[tokio::test]
async fn test_login_unauthorized_maps_to_credentials_message() {
    let h = harness();
    h.transport.push(401, json!({"success": false}));

    let err = h.controller.login("a@b.com", "wrong").await.unwrap_err();

    assert!(matches!(err, AuthError::Gateway(GatewayError::Unauthorized)));
    assert_eq!(err.user_message(), "invalid email or password");
}

#[tokio::test]
async fn test_login_server_error_maps_to_server_message_default() {
    let h = harness();
    h.transport.push(500, json!({}));

    let err = h.controller.login("a@b.com", "pw").await.unwrap_err();

    assert_eq!(err.user_message(), "server error, try again later");
    assert_eq!(h.store.read(), None);
}

// =========================================================================
// login — double-submit race
// =========================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_stale_login_completion_is_ignored() {
    let h = harness();
    // First attempt (agent) is held in flight; second (admin) answers
    // immediately.
    let release = h.transport.push_gated(200, login_ok_body("t1", "agent"));
    h.transport.push(200, login_ok_body("t2", "admin"));

    let controller = Arc::clone(&h.controller);
    let first = tokio::spawn(async move {
        controller.login("a@b.com", "pw").await
    });

    // Wait until the first request is actually in flight so the attempt
    // ordering is deterministic.
    while h.transport.seen().is_empty() {
        tokio::task::yield_now().await;
    }

    // The user submits again; this newer attempt completes first.
    let second = h.controller.login("a@b.com", "pw").await.unwrap();
    assert!(matches!(
        second,
        LoginOutcome::LoggedIn { destination: Route::AdminHome, .. }
    ));

    // Now let the stale response arrive.
    let _ = release.send(());
    let first = first.await.unwrap().unwrap();

    // The stale completion must be a no-op: the newer session survives
    // and only the newer navigation happened.
    assert!(matches!(first, LoginOutcome::Superseded));
    let session = h.store.read().unwrap();
    assert_eq!(session.token, "t2");
    assert_eq!(session.role, Role::Admin);
    assert_eq!(h.navigator.routes(), vec![Route::AdminHome]);
}

// =========================================================================
// logout
// =========================================================================

#[tokio::test]
async fn test_logout_clears_session_and_returns_to_login() {
    let h = harness();
    h.transport.push(200, login_ok_body("t1", "customer"));
    h.controller.login("a@b.com", "pw").await.unwrap();
    assert!(h.store.is_authenticated());

    h.controller.logout();

    assert_eq!(h.store.read(), None);
    assert_eq!(
        h.navigator.routes(),
        vec![Route::CustomerHome, Route::Login]
    );
}

#[tokio::test]
async fn test_logout_when_already_logged_out_is_harmless() {
    let h = harness();
    h.controller.logout();
    h.controller.logout();
    assert_eq!(h.store.read(), None);
}

// =========================================================================
// Password recovery
// =========================================================================

#[tokio::test]
async fn test_request_reset_acknowledges_without_session() {
    let h = harness();
    h.transport
        .push(200, json!({"success": true, "message": "email queued"}));

    h.controller.request_password_reset("a@b.com").await.unwrap();

    assert_eq!(h.transport.seen()[0].path, "/auth/password/reset-request");
    // Fire-and-acknowledge: no session comes out of this flow.
    assert_eq!(h.store.read(), None);
}

#[tokio::test]
async fn test_request_reset_rejection_surfaces_message() {
    let h = harness();
    h.transport
        .push(200, json!({"success": false, "message": "unknown email"}));

    let err = h
        .controller
        .request_password_reset("a@b.com")
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "unknown email");
}

#[tokio::test]
async fn test_submit_reset_mismatched_passwords_fails_without_network_call() {
    let h = harness();
    // Nothing scripted: any network call would panic the transport.

    let err = h
        .controller
        .submit_password_reset("tok", "p1", "p2")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
    assert!(h.transport.seen().is_empty(), "no network call may be made");
}

#[tokio::test]
async fn test_submit_reset_empty_passwords_fail_locally() {
    let h = harness();

    for (a, b) in [("", ""), ("", "p"), ("p", "")] {
        let err = h
            .controller
            .submit_password_reset("tok", a, b)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)), "pair=({a:?},{b:?})");
    }
    assert!(h.transport.seen().is_empty());
}

#[tokio::test]
async fn test_submit_reset_success_establishes_no_session() {
    let h = harness();
    h.transport.push(200, json!({"success": true}));

    h.controller
        .submit_password_reset("tok", "newpw", "newpw")
        .await
        .unwrap();

    let seen = h.transport.seen();
    assert_eq!(seen[0].path, "/auth/password/reset");
    assert_eq!(
        seen[0].body,
        Some(json!({"token": "tok", "newPassword": "newpw"}))
    );
    // The user must still sign in afterwards.
    assert_eq!(h.store.read(), None);
    assert!(!h.store.is_authenticated());
}
