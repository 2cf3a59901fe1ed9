//! Transport boundary: executes one request and returns one response.
//!
//! Non-2xx statuses are responses, not errors. A [`TransportError`] means no
//! usable response arrived at all.

use std::fmt;

use crate::ajax::{HttpRequest, HttpResponse};

/// Errors raised below the HTTP response level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be built (bad method, bad URL)
    InvalidRequest(String),
    /// Connection or protocol failure
    Connect(String),
    /// The response body could not be read
    Body(String),
    /// A scripted transport ran out of responses
    Exhausted,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidRequest(e) => write!(f, "Invalid request: {}", e),
            TransportError::Connect(e) => write!(f, "Connection failed: {}", e),
            TransportError::Body(e) => write!(f, "Failed to read response body: {}", e),
            TransportError::Exhausted => write!(f, "No response available"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Sends requests on behalf of the runtime
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking HTTP transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("featform/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Connect(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        tracing::info!("{} {}", request.method, request.url);
        let response = builder
            .send()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Body(e.to_string()))?;
        tracing::debug!("{} {} -> {}", request.method, request.url, status);

        Ok(HttpResponse { status, body })
    }
}
