//! Live HTTP adapter using `reqwest`.

use reqwest::Client;

use crate::ports::http::{HttpClient, HttpFuture, HttpRequest, HttpResponse};
use crate::ports::PortError;

const USER_AGENT: &str = concat!("devdesk/", env!("CARGO_PKG_VERSION"));

/// HTTP client that performs real requests.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a client. GitHub rejects requests without a user agent, so one is always sent.
    #[must_use]
    pub fn new() -> Self {
        Self { client: client_with_user_agent(USER_AGENT) }
    }
}

/// Builds a client sending `agent`, or a default client after a warning when the builder fails.
fn client_with_user_agent(agent: &str) -> Client {
    Client::builder().user_agent(agent).build().unwrap_or_else(|e| {
        tracing::warn!(
            error = %e,
            user_agent = agent,
            "failed to build HTTP client; falling back to one without a user agent"
        );
        Client::new()
    })
}

impl Default for LiveHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for LiveHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            tracing::debug!(url = %request.url, "GET");
            let mut builder = self.client.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder.send().await.map_err(|e| -> PortError {
                format!("request to {} failed: {e}", request.url).into()
            })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| -> PortError {
                format!("failed to read response from {}: {e}", request.url).into()
            })?;
            tracing::debug!(status = status.as_u16(), bytes = body.len(), "response");

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_the_tool_and_version() {
        assert_eq!(USER_AGENT, format!("devdesk/{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn invalid_user_agent_falls_back_to_default_client() {
        let client = client_with_user_agent("devdesk\n0.1");
        assert!(client.get("https://example.invalid/").build().is_ok());
    }
}
