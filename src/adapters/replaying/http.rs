//! Replaying adapter for the `HttpClient` port.

use super::{next_output, replay_result};
use crate::cassette::config::SharedReplayer;
use crate::ports::{HttpClient, HttpFuture, HttpRequest};

/// Serves recorded HTTP responses in order.
pub struct ReplayingHttpClient {
    replayer: Option<SharedReplayer>,
}

impl ReplayingHttpClient {
    /// Backed by `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// No cassette; panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        tracing::debug!(url = %request.url, "replaying GET");
        let output = next_output(self.replayer.as_ref(), "http", "get");
        Box::pin(async move { replay_result(output) })
    }
}
