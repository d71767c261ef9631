//! HTTP transport seam
//!
//! Endpoint methods never talk to the network directly. They hand a fully
//! built [`ApiRequest`] to an [`HttpTransport`] and interpret the returned
//! [`ApiResponse`]. Timeouts and connection pooling belong to the transport.

use crate::config::ClientConfig;
use crate::credentials::CredentialProvider;
use crate::error::{CanvaError, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// HTTP verb of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb may carry a JSON body
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request: path parameters substituted, nulls stripped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub method: HttpMethod,

    /// Path relative to the base URL (e.g. `/v1/assets/abc123`)
    pub path: String,

    /// Absolute URL (base URL + path), without the query string
    pub url: String,

    /// Query parameters in declaration order
    pub query: Vec<(String, String)>,

    /// JSON payload for POST/PATCH requests
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Look up a query parameter by name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw HTTP response as seen by the endpoint layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// JSON response with the given status
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the single outbound call of an endpoint method
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return whatever status the server produced.
    ///
    /// Only failures that yield no HTTP status at all are errors here; status
    /// interpretation is left to the caller.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;

    /// Name of this transport
    fn name(&self) -> &str;
}

/// Transport backed by `reqwest`
pub struct ReqwestTransport {
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl ReqwestTransport {
    /// Create a transport using the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CanvaError::InvalidConfiguration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            credentials,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let token = self.credentials.bearer_token()?;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending Canva API request");

        let response = builder.send().await.map_err(|e| {
            CanvaError::Transport(format!("{} {} failed: {}", request.method, request.path, e))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            CanvaError::Transport(format!("Failed to read response body: {}", e))
        })?;

        tracing::debug!(status, path = %request.path, "Received Canva API response");

        Ok(ApiResponse { status, body })
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

/// Transport for tests: records requests and replays canned responses
pub struct MockTransport {
    default_response: ApiResponse,
    queued: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Answer every request with `200 {}`
    pub fn new() -> Self {
        Self::with_response(ApiResponse::new(200, "{}"))
    }

    /// Answer every request with the given response
    pub fn with_response(response: ApiResponse) -> Self {
        Self {
            default_response: response,
            queued: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with a JSON body and status
    pub fn with_json(status: u16, body: serde_json::Value) -> Self {
        Self::with_response(ApiResponse::json(status, &body))
    }

    /// Queue a one-shot response, served before the default one
    pub async fn push_response(&self, response: ApiResponse) {
        self.queued.lock().await.push_back(response);
    }

    /// Every request received so far, in order
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    /// Most recent request
    pub async fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().await.last().cloned()
    }

    /// Number of requests received so far
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().await.push(request.clone());

        let queued = self.queued.lock().await.pop_front();
        Ok(queued.unwrap_or_else(|| self.default_response.clone()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
