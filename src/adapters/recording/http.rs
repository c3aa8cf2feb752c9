//! Recording adapter for the `HttpClient` port.

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{HttpClient, HttpFuture, HttpRequest};

/// Records HTTP exchanges while delegating to an inner client.
///
/// Header values are recorded as sent, so cassettes recorded with a
/// `GITHUB_TOKEN` contain that token.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: SharedRecorder,
}

impl RecordingHttpClient {
    /// Wraps `inner`.
    pub fn new(inner: Box<dyn HttpClient>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl HttpClient for RecordingHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.get(&request).await;
            record_result(&self.recorder, "http", "get", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::ports::{HttpResponse, PortError};

    struct FixedHttp;

    impl HttpClient for FixedHttp {
        fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
            let status = if request.url.ends_with("/missing") { 404 } else { 200 };
            Box::pin(async move {
                Ok::<_, PortError>(HttpResponse {
                    status,
                    status_text: String::new(),
                    body: "body".into(),
                })
            })
        }
    }

    #[tokio::test]
    async fn records_request_and_response() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("/unused", "test")));
        let client = RecordingHttpClient::new(Box::new(FixedHttp), Arc::clone(&recorder));

        let response = client.get(&HttpRequest::get("https://x.test/missing")).await.unwrap();
        assert_eq!(response.status, 404);
        drop(client);

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        assert_eq!(recorder.len(), 1);
    }
}
