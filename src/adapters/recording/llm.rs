//! Recording adapter for the `LlmClient` port.

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Records chat completions while delegating to an inner client.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: SharedRecorder,
}

impl RecordingLlmClient {
    /// Wraps `inner`.
    pub fn new(inner: Box<dyn LlmClient>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&self.recorder, "llm", "complete", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::ports::{ChatMessage, PortError};

    struct Unauthorized;

    impl LlmClient for Unauthorized {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            Box::pin(async {
                Err::<crate::ports::CompletionResponse, PortError>(
                    "chat API error (401): bad key".into(),
                )
            })
        }
    }

    #[tokio::test]
    async fn failed_completions_are_recorded_as_err() {
        let path = std::env::temp_dir().join("devdesk_recording_llm.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "llm")));
        let llm = RecordingLlmClient::new(Box::new(Unauthorized), Arc::clone(&recorder));

        let request = CompletionRequest {
            model: "m".into(),
            messages: vec![ChatMessage::user("lunch?")],
            max_tokens: None,
        };
        assert!(llm.complete(&request).await.is_err());
        drop(llm);

        let recorder = Arc::try_unwrap(recorder).ok().unwrap().into_inner().unwrap();
        assert_eq!(recorder.len(), 1);
        let written = recorder.finish().unwrap();
        let text = std::fs::read_to_string(&written).unwrap();
        assert!(text.contains("Err:"));
        assert!(text.contains("chat API error (401): bad key"));
        assert!(text.contains("lunch?"));
        let _ = std::fs::remove_file(written);
    }
}
