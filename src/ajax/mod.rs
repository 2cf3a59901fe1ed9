//! JSON request building and response classification.
//!
//! Requests always carry a JSON content type and ask for JSON back. A
//! response is classified into an [`Outcome`]: a success payload, a redirect,
//! a failure [`Envelope`], or a dropped response whose body could not be
//! read as JSON. Dropped responses are logged and go no further.

mod envelope;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::transport::TransportError;

pub use envelope::{Envelope, ErrorCode, MISSING_REASON, UNKNOWN_REASON};

/// Key of a success payload that sends the whole page elsewhere
pub const REDIRECT_KEY: &str = "_redirect";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP method of a form or inline edit.
///
/// Forms without a method attribute submit with GET.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Other(m) => m,
        }
    }

    pub fn is_get(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Ok(match upper.as_str() {
            "" | "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            _ => Method::Other(upper),
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body before encoding
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Sent as-is
    Text(String),
    /// Encoded as JSON text
    Json(Value),
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

/// A request ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body parsed back as JSON (None when absent or not JSON)
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

/// A response as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a response was dropped without reaching a callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportParseFailure {
    /// HTTP status, if a response arrived at all
    pub status: Option<u16>,
    /// Raw response text (or transport error text)
    pub response: String,
    pub message: String,
}

impl fmt::Display for TransportParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "Failed unpacking the envelope (HTTP {}): {}",
                status, self.message
            ),
            None => write!(f, "Failed unpacking the envelope: {}", self.message),
        }
    }
}

impl std::error::Error for TransportParseFailure {}

/// Classified response
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    /// Success payload carrying `_redirect`: navigate instead of updating in place
    Redirect(String),
    Failure(Envelope),
    Dropped(TransportParseFailure),
}

/// Build a JSON request. Non-string bodies are encoded as JSON text.
pub fn request(method: Method, url: &str, body: impl Into<Body>) -> HttpRequest {
    let body = match body.into() {
        Body::Text(text) => text,
        Body::Json(value) => value.to_string(),
    };
    HttpRequest {
        method,
        url: url.to_string(),
        headers: vec![
            ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
        ],
        body: Some(body),
    }
}

/// Classify a response from the transport
pub fn receive(response: &HttpResponse) -> Outcome {
    let parsed: Result<Value, _> = serde_json::from_str(&response.body);

    if response.is_success() {
        return match parsed {
            Ok(payload) => {
                tracing::debug!("Success: {}", payload);
                match payload.get(REDIRECT_KEY).and_then(Value::as_str) {
                    Some(target) => Outcome::Redirect(target.to_string()),
                    None => Outcome::Success(payload),
                }
            }
            Err(e) => dropped(Some(response.status), &response.body, e.to_string()),
        };
    }

    match parsed {
        Ok(raw) => {
            tracing::debug!("Error: {}", raw);
            Outcome::Failure(Envelope::from_value(raw))
        }
        Err(e) => dropped(Some(response.status), &response.body, e.to_string()),
    }
}

/// Classify a transport result; transport errors are dropped like unreadable bodies
pub fn receive_result(result: &Result<HttpResponse, TransportError>) -> Outcome {
    match result {
        Ok(response) => receive(response),
        Err(e) => dropped(None, "", e.to_string()),
    }
}

fn dropped(status: Option<u16>, response: &str, message: String) -> Outcome {
    let failure = TransportParseFailure {
        status,
        response: response.to_string(),
        message,
    };
    tracing::error!("{}", failure);
    tracing::error!("Response: {:?}", failure.response);
    Outcome::Dropped(failure)
}
