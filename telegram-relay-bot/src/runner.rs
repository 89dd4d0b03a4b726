//! REPL runner: converts teloxide messages to core messages and passes them
//! to the dispatcher. Calls get_me before starting to feed the ready event;
//! each message runs in its own spawned task so handling one message never
//! blocks dispatch of others.

use anyhow::Result;
use relay_core::ToCoreMessage;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use crate::adapters::TelegramMessageWrapper;
use crate::dispatcher::Dispatcher;

/// Starts the REPL with the given teloxide Bot and dispatcher.
#[instrument(skip(bot, dispatcher))]
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Arc<Dispatcher>) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            dispatcher
                .on_ready(me.user.id.0 as i64, me.user.username.as_deref())
                .await;
        }
        Err(e) => {
            warn!(error = %e, "get_me failed; own messages cannot be filtered by id");
        }
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let dispatcher = dispatcher.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                "Received message"
            );

            // Handle in a spawned task so the REPL returns immediately.
            tokio::spawn(async move {
                if let Err(e) = dispatcher.on_message(&core_msg).await {
                    error!(error = %e, chat_id = core_msg.chat.id, "Dispatch failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
