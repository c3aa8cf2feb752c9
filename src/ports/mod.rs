//! Port traits defining external boundaries.
//!
//! Each trait is one boundary between the utilities and the outside world
//! (time, disk, HTTP, IDs, the chat model). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod llm;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use http::{HttpClient, HttpFuture, HttpRequest, HttpResponse};
pub use id_gen::IdGenerator;
pub use llm::{ChatMessage, CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Error type shared by all port traits.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
