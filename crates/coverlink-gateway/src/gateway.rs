//! The gateway: one pipeline for every outbound request.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use coverlink_protocol::{Envelope, Route};
use coverlink_store::SessionStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ApiRequest, ApiTransport, GatewayError, Method, Navigator};

/// The single choke point for calls to the remote API.
///
/// ## Eviction and the redirect latch
///
/// When any response comes back 401, the gateway must — synchronously
/// with handling that response — clear the session store and force the
/// application to the login route. A burst of concurrent in-flight
/// requests can all fail with 401 at once; clearing is idempotent so
/// repeated clears are harmless, but the redirect must fire exactly once
/// per burst. The `redirected` latch handles that: the first 401 flips
/// it and navigates, later 401s see it already set and only clear. The
/// latch re-arms as soon as a request goes out carrying a token again,
/// i.e. after the next successful login.
pub struct Gateway<T: ApiTransport, N: Navigator> {
    transport: T,
    store: SessionStore,
    navigator: Arc<N>,
    redirected: AtomicBool,
}

impl<T: ApiTransport, N: Navigator> Gateway<T, N> {
    /// Creates a gateway over the given transport, session store, and
    /// navigation surface.
    pub fn new(transport: T, store: SessionStore, navigator: Arc<N>) -> Self {
        Gateway {
            transport,
            store,
            navigator,
            redirected: AtomicBool::new(false),
        }
    }

    /// The session store this gateway reads tokens from and evicts.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Sends a POST with a JSON body, decoding the response as `R`.
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(GatewayError::Encode)?;
        self.request(Method::Post, path, Some(body)).await
    }

    /// Sends a GET, decoding the response as `R`.
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub async fn get<R>(&self, path: &str) -> Result<R, GatewayError>
    where
        R: DeserializeOwned,
    {
        self.request(Method::Get, path, None).await
    }

    /// The pipeline every request goes through. No caller bypasses it.
    ///
    /// # Errors
    /// - [`GatewayError::Transport`] — the request never got a response
    /// - [`GatewayError::Unauthorized`] — 401; the session has been
    ///   evicted and the login redirect triggered before this returns
    /// - [`GatewayError::Status`] — any other non-2xx, passed through
    /// - [`GatewayError::Decode`] — 2xx body didn't match `R`
    async fn request<R>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<R, GatewayError>
    where
        R: DeserializeOwned,
    {
        // Step 1: bearer injection. Read at send time, from the shared
        // store — never from a cached copy, so a re-login between two
        // requests is picked up immediately.
        let bearer = self.store.token();
        if bearer.is_some() {
            // A token is present again: any previous eviction burst is
            // over, so the redirect latch re-arms.
            self.redirected.store(false, Ordering::SeqCst);
        }

        tracing::debug!(?method, path, authenticated = bearer.is_some(),
            "sending request");

        let response = self
            .transport
            .execute(ApiRequest {
                method,
                path: path.to_string(),
                body,
                bearer,
            })
            .await?;

        // Step 2: response inspection — every response, success or not.
        if response.status == 401 {
            self.evict();
            return Err(GatewayError::Unauthorized);
        }

        if !response.is_success() {
            // Pass through unmodified; surface the server's envelope
            // message when there is one. No retries — retry policy
            // belongs to the caller.
            let message =
                serde_json::from_slice::<Envelope<serde_json::Value>>(&response.body)
                    .ok()
                    .and_then(|envelope| envelope.message);
            tracing::debug!(status = response.status, path, "request failed");
            return Err(GatewayError::Status {
                status: response.status,
                message,
            });
        }

        serde_json::from_slice(&response.body).map_err(GatewayError::Decode)
    }

    /// Clears the session and, once per burst, redirects to login.
    fn evict(&self) {
        self.store.clear();
        if !self.redirected.swap(true, Ordering::SeqCst) {
            tracing::warn!("session rejected by server; redirecting to login");
            self.navigator.navigate(Route::Login);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
