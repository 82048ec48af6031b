//! HTTP transport for the storefront API.

use crate::error::ApiError;
use crate::token::AuthToken;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Per-request timeout. The transport owns timeout policy; the
    /// controllers above it own none.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Thin wrapper over `reqwest` that attaches the bearer credential,
/// checks the response status, and decodes JSON bodies.
///
/// Non-success responses are mined for the server's `message`/`error`
/// string before being surfaced, so callers see what the backend said
/// rather than a bare status code.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client from config.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::from)?;
        Ok(Self {
            inner,
            base_url: config.base_url,
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError> {
        let mut req = self.inner.get(self.url(path));
        if !params.is_empty() {
            req = req.query(params);
        }
        self.execute(req, token).await
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError> {
        let req = self.inner.post(self.url(path)).json(body);
        self.execute(req, token).await
    }

    /// POST a JSON body, discarding the response body.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AuthToken>,
    ) -> Result<(), ApiError> {
        let req = self.inner.post(self.url(path)).json(body);
        self.execute_unit(req, token).await
    }

    /// DELETE a resource, discarding the response body.
    pub async fn delete_unit(&self, path: &str, token: Option<&AuthToken>) -> Result<(), ApiError> {
        let req = self.inner.delete(self.url(path));
        self.execute_unit(req, token).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError> {
        let resp = self.send(req, token).await?;
        resp.json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn execute_unit(
        &self,
        req: reqwest::RequestBuilder,
        token: Option<&AuthToken>,
    ) -> Result<(), ApiError> {
        self.send(req, token).await.map(|_| ())
    }

    async fn send(
        &self,
        mut req: reqwest::RequestBuilder,
        token: Option<&AuthToken>,
    ) -> Result<reqwest::Response, ApiError> {
        if let Some(token) = token {
            req = req.bearer_auth(token.as_str());
        }

        let resp = req.send().await.map_err(ApiError::from)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = resp.text().await.ok().and_then(|body| server_message(&body));
        tracing::warn!(status = status.as_u16(), "storefront request failed");
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull the server's `message` or `error` field out of an error body.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for field in ["message", "error"] {
        if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}
