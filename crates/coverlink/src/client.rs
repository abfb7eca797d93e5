//! `CoverlinkClient` builder and wiring.
//!
//! This is the entry point for embedding the session layer in an
//! application shell. It ties the pieces together in dependency order:
//! store → gateway → auth controller, all sharing one navigator and one
//! session store.

use std::path::PathBuf;
use std::sync::Arc;

use coverlink_auth::{AuthConfig, AuthController, Frontend};
use coverlink_gateway::{ApiTransport, Gateway, Navigator};
use coverlink_store::SessionStore;

#[cfg(feature = "http")]
use coverlink_gateway::HttpTransport;

/// Builder for configuring and wiring a [`CoverlinkClient`].
///
/// # Example
///
/// ```rust,ignore
/// let client = CoverlinkClient::builder()
///     .api_url("https://api.coverlink.example")
///     .store_path("session.json")
///     .build(shell_navigator, shell_frontend);
/// ```
pub struct CoverlinkClientBuilder {
    api_url: String,
    store_path: Option<PathBuf>,
    auth_config: AuthConfig,
}

impl CoverlinkClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            api_url: "http://127.0.0.1:8080".to_string(),
            store_path: None,
            auth_config: AuthConfig::default(),
        }
    }

    /// Sets the base URL of the remote API.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the file the session is persisted to. Without one the
    /// session lives in memory only and a restart logs the user out.
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Sets the authentication flow configuration.
    pub fn auth_config(mut self, config: AuthConfig) -> Self {
        self.auth_config = config;
        self
    }

    /// Builds the client over the production HTTP transport.
    #[cfg(feature = "http")]
    pub fn build<N: Navigator, F: Frontend>(
        self,
        navigator: N,
        frontend: F,
    ) -> CoverlinkClient<HttpTransport, N, F> {
        let transport = HttpTransport::new(self.api_url.clone());
        self.build_with_transport(transport, navigator, frontend)
    }

    /// Builds the client over any [`ApiTransport`] — the seam tests and
    /// non-HTTP hosts plug into.
    pub fn build_with_transport<T: ApiTransport, N: Navigator, F: Frontend>(
        self,
        transport: T,
        navigator: N,
        frontend: F,
    ) -> CoverlinkClient<T, N, F> {
        // Startup reads the persisted session once; every component
        // from here on shares this one store.
        let store = match &self.store_path {
            Some(path) => SessionStore::open(path),
            None => SessionStore::in_memory(),
        };
        let navigator = Arc::new(navigator);
        let frontend = Arc::new(frontend);

        let gateway = Arc::new(Gateway::new(
            transport,
            store.clone(),
            Arc::clone(&navigator),
        ));
        let auth = AuthController::new(
            Arc::clone(&gateway),
            store.clone(),
            navigator,
            frontend,
            self.auth_config,
        );

        tracing::debug!(authenticated = store.is_authenticated(),
            "coverlink client ready");

        CoverlinkClient {
            store,
            gateway,
            auth,
        }
    }
}

impl Default for CoverlinkClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A wired Coverlink session layer.
///
/// Hand `auth()` to the login/recovery screens, `gateway()` to every
/// feature module that talks to the API, and `store().subscribe()` to
/// any view that needs to react to session changes.
pub struct CoverlinkClient<T: ApiTransport, N: Navigator, F: Frontend> {
    store: SessionStore,
    gateway: Arc<Gateway<T, N>>,
    auth: AuthController<T, N, F>,
}

impl<T: ApiTransport, N: Navigator, F: Frontend> CoverlinkClient<T, N, F> {
    /// Creates a new builder.
    pub fn builder() -> CoverlinkClientBuilder {
        CoverlinkClientBuilder::new()
    }

    /// The authentication flows.
    pub fn auth(&self) -> &AuthController<T, N, F> {
        &self.auth
    }

    /// The outbound request pipeline, for every other API call the
    /// application makes.
    pub fn gateway(&self) -> &Arc<Gateway<T, N>> {
        &self.gateway
    }

    /// The shared session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
