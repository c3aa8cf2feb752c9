//! Live adapter for the `LlmClient` port using an OpenAI-compatible
//! chat completions endpoint (OpenRouter by default).

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{
    ChatMessage, CompletionFuture, CompletionRequest, CompletionResponse, LlmClient,
};
use crate::ports::PortError;

/// Chat client calling a hosted completions API.
pub struct LiveLlmClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl LiveLlmClient {
    /// Creates a client for `url`. A missing key is reported on first use.
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self { client: Client::new(), url: url.into(), api_key }
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatCompletionReply {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = self
                .api_key
                .as_deref()
                .ok_or_else(|| -> PortError { "OPENROUTER_API_KEY is not set".into() })?;

            let body = ChatCompletionBody {
                model: &request.model,
                messages: &request.messages,
                max_tokens: request.max_tokens,
            };

            tracing::debug!(url = %self.url, model = %request.model, "chat completion");
            let response = self
                .client
                .post(&self.url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> PortError { format!("chat API request failed: {e}").into() })?;

            let status = response.status();
            let text = response.text().await.map_err(|e| -> PortError {
                format!("failed to read chat API response: {e}").into()
            })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(format!("chat API error ({}): {msg}", status.as_u16()).into());
            }

            parse_reply(&text)
        })
    }
}

fn parse_reply(text: &str) -> Result<CompletionResponse, PortError> {
    let reply: ChatCompletionReply = serde_json::from_str(text)
        .map_err(|e| -> PortError { format!("failed to parse chat API response: {e}").into() })?;
    let text = reply
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .collect::<Vec<_>>()
        .join("\n");
    let (prompt_tokens, completion_tokens) =
        reply.usage.map_or((0, 0), |u| (u.prompt_tokens, u.completion_tokens));
    Ok(CompletionResponse { text, prompt_tokens, completion_tokens })
}
