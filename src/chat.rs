//! Lunch-picking chat over a hosted completion model.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ports::{ChatMessage, CompletionRequest, LlmClient};

/// Dishes offered when none are configured.
pub const DEFAULT_DISHES: &[&str] =
    &["Bún chả", "Phở gà", "Cơm rang", "Bún cá", "Bún bò Huế", "Phở bò", "Cơm gà"];

/// Builds the prompt sent to the model for one user message.
///
/// The prompt is Vietnamese: the model plays a sweet girl helping the
/// "anh trai" pick lunch, calls itself "em", and answers briefly with emoji.
#[must_use]
pub fn build_prompt<S: AsRef<str>>(user_input: &str, dishes: &[S]) -> String {
    let menu: Vec<&str> = dishes.iter().map(|d| d.as_ref()).collect();
    let menu = menu.join(", ");
    format!(
        "Bạn là một cô gái đáng yêu giúp các anh trai lựa chọn món ăn cho bữa trưa.\n\
         Đây là các lựa chọn món ăn: {menu}.\n\
         Đây là lời nói của anh trai: {user_input}\n\
         Hãy đưa ra một lựa chọn phù hợp nhát dựa trên yêu cầu của anh trai và các lựa chọn \
         có sẵn một cách đáng yêu nhưng hợp lí và ngắn gọn, xưng hô là em và anh trai và thêm \
         cả các emoji."
    )
}

/// The model's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Reply text.
    pub text: String,
    /// Model that answered.
    pub model: String,
    /// Prompt tokens used.
    pub prompt_tokens: u32,
    /// Completion tokens used.
    pub completion_tokens: u32,
}

/// Sends lunch questions to a chat model.
pub struct ChatService<'a> {
    llm: &'a dyn LlmClient,
    model: String,
    dishes: Vec<String>,
}

impl<'a> ChatService<'a> {
    /// Creates a service for `model` offering [`DEFAULT_DISHES`].
    #[must_use]
    pub fn new(llm: &'a dyn LlmClient, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            dishes: DEFAULT_DISHES.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    /// Replaces the dish list. An empty list keeps the current one.
    #[must_use]
    pub fn with_dishes(mut self, dishes: Vec<String>) -> Self {
        if !dishes.is_empty() {
            self.dishes = dishes;
        }
        self
    }

    /// Dishes currently offered.
    #[must_use]
    pub fn dishes(&self) -> &[String] {
        &self.dishes
    }

    /// Asks the model to pick a dish for `user_input`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] for blank input (no request is made) or the
    /// port error if the completion fails.
    pub async fn ask(&self, user_input: &str) -> Result<ChatReply> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(Error::Empty("message"));
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(build_prompt(user_input, &self.dishes))],
            max_tokens: None,
        };
        let response = self
            .llm
            .complete(&request)
            .await
            .map_err(|e| Error::port("Chat completion failed", e))?;
        tracing::info!(
            model = %self.model,
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            "chat reply received"
        );

        Ok(ChatReply {
            text: response.text,
            model: self.model.clone(),
            prompt_tokens: response.prompt_tokens,
            completion_tokens: response.completion_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::testing::replayer;
    use crate::adapters::replaying::ReplayingLlmClient;
    use crate::ports::{CompletionFuture, CompletionResponse, PortError};

    struct CapturingLlm {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl LlmClient for CapturingLlm {
        fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
            self.requests.lock().unwrap().push(request.clone());
            Box::pin(async {
                Ok::<_, PortError>(CompletionResponse {
                    text: "Bún chả! 🍜".into(),
                    prompt_tokens: 10,
                    completion_tokens: 3,
                })
            })
        }
    }

    #[test]
    fn prompt_lists_dishes_and_quotes_user() {
        let prompt = build_prompt("something with soup please", DEFAULT_DISHES);
        assert!(prompt.contains("Bún chả, Phở gà, Cơm rang, Bún cá, Bún bò Huế, Phở bò, Cơm gà"));
        assert!(prompt.starts_with("Bạn là một cô gái đáng yêu"));
        assert!(prompt.contains("Đây là lời nói của anh trai: something with soup please\n"));
        assert!(prompt.contains("xưng hô là em và anh trai và thêm cả các emoji."));
    }

    #[tokio::test]
    async fn ask_sends_one_user_message_to_configured_model() {
        let llm = CapturingLlm { requests: Mutex::new(Vec::new()) };
        let service = ChatService::new(&llm, "mistral/ministral-8b")
            .with_dishes(vec!["Pizza".into(), "Sushi".into()]);

        let reply = service.ask("  I'm starving  ").await.unwrap();
        assert_eq!(reply.text, "Bún chả! 🍜");
        assert_eq!(reply.model, "mistral/ministral-8b");

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "mistral/ministral-8b");
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].messages[0].role, "user");
        assert!(requests[0].messages[0].content.contains("Pizza, Sushi"));
        assert!(requests[0].messages[0].content.contains("anh trai: I'm starving\n"));
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_request() {
        let llm = CapturingLlm { requests: Mutex::new(Vec::new()) };
        let service = ChatService::new(&llm, "m");

        let err = service.ask("   ").await.unwrap_err();
        assert_eq!(err.to_string(), "message must not be empty");
        assert!(llm.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn api_errors_are_wrapped() {
        let llm = ReplayingLlmClient::new(replayer(vec![(
            "llm",
            "complete",
            json!({"Err": "chat API error (401): No auth credentials found"}),
        )]));
        let service = ChatService::new(&llm, "m");

        let err = service.ask("hi").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Chat completion failed: chat API error (401): No auth credentials found"
        );
    }

    #[test]
    fn empty_dish_override_keeps_defaults() {
        let llm = CapturingLlm { requests: Mutex::new(Vec::new()) };
        let service = ChatService::new(&llm, "m").with_dishes(Vec::new());
        assert_eq!(service.dishes().len(), DEFAULT_DISHES.len());
    }
}
