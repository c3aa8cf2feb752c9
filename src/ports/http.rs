//! HTTP port used by the vcpkg resolver.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Boxed future returned by [`HttpClient::get`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, PortError>> + Send + 'a>>;

/// An outgoing GET request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Absolute URL.
    pub url: String,
    /// Extra request headers as `(name, value)` pairs.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a request for `url` with no extra headers.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into(), headers: Vec::new() }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A received response. Non-2xx statuses are responses, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Numeric status code.
    pub status: u16,
    /// Canonical reason phrase (`"Not Found"`), empty when unknown.
    pub status_text: String,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP GET requests.
///
/// Transport failures (DNS, TLS, connection reset) are errors; any status
/// the server answers with is returned as an [`HttpResponse`].
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_>;
}
