//! `devdesk chat` command.

use crate::chat::ChatService;
use crate::config::Config;
use crate::context::ServiceContext;

/// Execute the `chat` command and print the model's reply.
///
/// # Errors
///
/// Returns an error string for a blank message or a failed completion.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    message: &str,
    dishes: &[String],
) -> Result<(), String> {
    let service = ChatService::new(ctx.llm.as_ref(), config.chat_model.clone())
        .with_dishes(dishes.to_vec());
    let reply = service.ask(message).await.map_err(|e| e.to_string())?;
    println!("{}", reply.text.trim());
    Ok(())
}
