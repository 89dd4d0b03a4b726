//! Per-message dispatcher: filters self-authored and empty messages, invokes
//! the completion relay, and sends the reply back to the originating chat in
//! length-limited segments. The single place that catches relay failures.

use relay_core::{Bot, Message, Result};
use relay_llm::Completer;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

/// Hard limit on a single outbound message, in characters.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Fixed apology sent to the chat when generating a response fails.
pub const MSG_GENERATION_FAILED: &str = "Error while generating a response.";

/// Splits `text` into consecutive segments of at most `limit` characters,
/// preserving order. Concatenating the segments yields the original text.
pub fn split_reply(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Logs an error and its cause chain. First item with `first_msg`, rest with "Caused by".
fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
    for (i, cause) in e.chain().enumerate() {
        if i == 0 {
            error!(cause = %cause, "{}", first_msg);
        } else {
            error!(cause = %cause, "Caused by");
        }
    }
}

/// Event dispatcher: one instance shared across all inbound messages, each
/// handled independently. Shared state is limited to the bot's own user id,
/// written once on ready.
pub struct Dispatcher {
    bot: Arc<dyn Bot>,
    completer: Arc<dyn Completer>,
    self_id: Arc<RwLock<Option<i64>>>,
}

impl Dispatcher {
    pub fn new(bot: Arc<dyn Bot>, completer: Arc<dyn Completer>) -> Self {
        Self {
            bot,
            completer,
            self_id: Arc::new(RwLock::new(None)),
        }
    }

    /// Ready event: records the bot's own identity and announces the login.
    pub async fn on_ready(&self, user_id: i64, username: Option<&str>) {
        *self.self_id.write().await = Some(user_id);
        info!(
            user_id,
            username = username.unwrap_or("-"),
            "Logged in and ready"
        );
    }

    /// Message event: filter, complete, chunk, send. Relay failures are
    /// converted to a fixed apology here and logged for the operator; they
    /// never escape to the event loop.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    pub async fn on_message(&self, message: &Message) -> Result<()> {
        if self.is_own_message(message).await {
            debug!("ignoring own message");
            return Ok(());
        }

        let content = message.content.trim();
        if content.is_empty() {
            debug!("ignoring empty message");
            return Ok(());
        }

        match self.completer.complete(content).await {
            Ok(reply) => {
                for segment in split_reply(&reply, MAX_MESSAGE_LEN) {
                    self.bot.send_message(&message.chat, &segment).await?;
                }
            }
            Err(e) => {
                log_error_chain(&e, "Completion failed");
                self.bot
                    .send_message(&message.chat, MSG_GENERATION_FAILED)
                    .await?;
            }
        }

        Ok(())
    }

    async fn is_own_message(&self, message: &Message) -> bool {
        match *self.self_id.read().await {
            Some(id) => message.user.id == id,
            None => false,
        }
    }
}
