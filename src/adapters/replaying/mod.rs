//! Replaying adapters: serve port calls from a cassette.

pub mod clock;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod llm;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use http::ReplayingHttpClient;
pub use id_gen::ReplayingIdGenerator;
pub use llm::ReplayingLlmClient;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::config::SharedReplayer;
use crate::ports::PortError;

/// Take the next recorded output for `port`/`method`.
///
/// # Panics
///
/// Panics if no replayer is configured or the cassette is exhausted.
pub(crate) fn next_output(replayer: Option<&SharedReplayer>, port: &str, method: &str) -> Value {
    let Some(replayer) = replayer else {
        panic!("{port} port not configured in CassetteConfig; no cassette loaded for {port}");
    };
    let mut guard = replayer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.next_interaction(port, method).output.clone()
}

/// Decode a recorded infallible output.
///
/// # Panics
///
/// Panics if the recorded value does not have the expected shape.
pub(crate) fn replay_value<T: DeserializeOwned>(output: Value, context: &str) -> T {
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{context}: recorded output has the wrong shape: {e}"))
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` output.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Value) -> Result<T, PortError> {
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| -> PortError { format!("recorded output has the wrong shape: {e}").into() })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::cassette::config::SharedReplayer;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;

    /// Builds a shared replayer from `(port, method, output)` triples.
    pub(crate) fn replayer(entries: Vec<(&str, &str, Value)>) -> SharedReplayer {
        let interactions = entries
            .into_iter()
            .enumerate()
            .map(|(seq, (port, method, output))| Interaction {
                seq: seq as u64,
                port: port.into(),
                method: method.into(),
                input: json!({}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "test".into(),
            interactions,
        };
        Arc::new(Mutex::new(CassetteReplayer::new(&cassette)))
    }
}
