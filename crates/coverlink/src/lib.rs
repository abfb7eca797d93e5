//! # Coverlink
//!
//! Client-side session and API layer for the Coverlink insurance
//! platform.
//!
//! The UI renders forms and tables; this crate owns everything with a
//! contract behind it: establishing a session from credentials, keeping
//! the persisted and in-memory session in lockstep, attaching the bearer
//! token to every outgoing request, evicting the session when the server
//! rejects it, and deciding where the application goes next.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coverlink::prelude::*;
//!
//! // Implement Navigator and Frontend for your UI shell, then:
//! // let client = CoverlinkClient::builder()
//! //     .api_url("https://api.coverlink.example")
//! //     .store_path("session.json")
//! //     .build(my_navigator, my_frontend);
//! // client.auth().login(email, password).await?;
//! ```

mod client;
mod error;

pub use client::{CoverlinkClient, CoverlinkClientBuilder};
pub use error::CoverlinkError;

/// The working set, re-exported flat.
pub mod prelude {
    pub use coverlink_auth::{
        AuthConfig, AuthController, AuthError, Frontend, LoginOutcome, Notice,
        NoticeKind,
    };
    #[cfg(feature = "http")]
    pub use coverlink_gateway::HttpTransport;
    pub use coverlink_gateway::{
        ApiRequest, ApiTransport, Gateway, GatewayError, Method, Navigator,
        RawResponse,
    };
    pub use coverlink_protocol::{Envelope, Role, Route};
    pub use coverlink_store::{Session, SessionStore};

    pub use crate::{CoverlinkClient, CoverlinkClientBuilder, CoverlinkError};
}
