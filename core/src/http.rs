//! HTTP transport types and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. `VkClient` builds an `HttpRequest`,
//! hands it to a `Transport`, and parses whatever `HttpResponse` comes back.
//! The transport is the only place that touches the network, so parsing can
//! be exercised with hand-built responses and no I/O at all.
//!
//! The query is kept as ordered `(key, value)` pairs rather than a pre-encoded
//! string; encoding happens once, in `query_string`, or inside the transport.

use serde::de::DeserializeOwned;

/// HTTP method for a request. The VK method endpoint is only ever called
/// with GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    /// Normalized query parameters in transmission order.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Render `query` as `application/x-www-form-urlencoded`.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// The URL with the encoded query appended.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        format!("{}?{}", self.url, self.query_string())
    }

    /// Look up a query value by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` (or by hand in tests) and consumed by the
/// response parser. The body is kept as raw bytes; nothing about it is
/// assumed until it is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A response with the given status, no headers and the given body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Executes an `HttpRequest` and returns the raw response.
///
/// Implementations should hand back non-2xx responses as data rather than
/// errors; the VK API reports failures inside a 200 body and the parser is
/// the one that classifies them. `Error` is only for failures where no
/// response exists (connection refused, DNS, TLS, ...).
pub trait Transport {
    type Error;

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error>;
}

impl<F, E> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, E>,
{
    type Error = E;

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, E> {
        self(request)
    }
}
