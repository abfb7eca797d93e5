//! Production HTTP transport backed by `reqwest`.

use crate::{ApiRequest, ApiTransport, GatewayError, Method, RawResponse};

/// An [`ApiTransport`] that speaks HTTP to the real API.
///
/// Holds one `reqwest::Client` (connection pooling comes for free) and
/// the API base URL. Status classification and body decoding are *not*
/// done here — the transport's only job is to deliver the request and
/// hand back whatever came over the wire.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the given API base URL, e.g.
    /// `https://api.coverlink.example`.
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Like [`new`](Self::new) but with a caller-configured client
    /// (timeouts, proxies, extra headers).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        HttpTransport {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl ApiTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, GatewayError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?
            .to_vec();

        Ok(RawResponse { status, body })
    }
}
