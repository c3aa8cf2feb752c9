//! Recording adapters: delegate to an inner adapter and capture each call.

pub mod clock;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod llm;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use http::RecordingHttpClient;
pub use id_gen::RecordingIdGenerator;
pub use llm::RecordingLlmClient;

use serde::Serialize;
use serde_json::Value;

use crate::cassette::session::SharedRecorder;

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!("failed to serialize recorded value: {e}");
        Value::Null
    })
}

fn push(recorder: &SharedRecorder, port: &str, method: &str, input: Value, output: Value) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(_) => tracing::warn!(port, method, "recorder lock poisoned; interaction dropped"),
    }
}

/// Record an infallible call.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    push(recorder, port, method, to_json(input), to_json(output));
}

/// Record a fallible call as `{"Ok": v}` or `{"Err": message}`.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "Ok": to_json(v) }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };
    push(recorder, port, method, to_json(input), output);
}
