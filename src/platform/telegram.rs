use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ReplyParameters};
use teloxide::update_listeners::Polling;
use tracing::{debug, info};

use crate::bot::App;
use crate::platform::{ChatPlatform, IncomingMessage, SentMessage};

/// `ChatPlatform` backed by the Telegram Bot API.
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn parse_chat_id(raw: &str) -> Result<ChatId> {
    raw.parse::<i64>()
        .map(ChatId)
        .with_context(|| format!("Invalid Telegram chat id: {}", raw))
}

fn parse_message_id(raw: &str) -> Result<MessageId> {
    raw.parse::<i32>()
        .map(MessageId)
        .with_context(|| format!("Invalid Telegram message id: {}", raw))
}

#[async_trait]
impl ChatPlatform for TelegramPlatform {
    async fn reply(&self, to: &IncomingMessage, text: &str) -> Result<SentMessage> {
        let sent = self
            .bot
            .send_message(parse_chat_id(&to.chat_id)?, text)
            .reply_parameters(ReplyParameters::new(parse_message_id(&to.message_id)?))
            .await
            .context("Failed to send message")?;

        Ok(SentMessage {
            chat_id: sent.chat.id.0.to_string(),
            message_id: sent.id.0.to_string(),
        })
    }

    async fn edit(&self, message: &SentMessage, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(
                parse_chat_id(&message.chat_id)?,
                parse_message_id(&message.message_id)?,
                text,
            )
            .await
            .context("Failed to edit message")?;
        Ok(())
    }
}

/// Run the Telegram bot platform until the process is stopped.
pub async fn run(app: Arc<App>, bot_token: &str) -> Result<()> {
    let bot = Bot::new(bot_token);

    let me = bot.get_me().await.context("Failed to connect to Telegram")?;
    info!("Bot started as @{}", me.username());

    let handler = Update::filter_message().endpoint(handle_message);

    // Backlog from before startup is discarded.
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![app])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("telegram update listener"),
        )
        .await;

    Ok(())
}

fn to_incoming(msg: &Message) -> IncomingMessage {
    let (user_id, user_name) = match msg.from.as_ref() {
        Some(user) => (
            user.id.0.to_string(),
            user.username
                .clone()
                .unwrap_or_else(|| user.first_name.clone()),
        ),
        None => (String::new(), String::new()),
    };

    IncomingMessage {
        platform: "telegram".to_string(),
        user_id,
        user_name,
        chat_id: msg.chat.id.0.to_string(),
        message_id: msg.id.0.to_string(),
        text: msg.text().unwrap_or_default().to_string(),
    }
}

async fn handle_message(bot: Bot, msg: Message, app: Arc<App>) -> Result<()> {
    let incoming = to_incoming(&msg);
    debug!(
        "Telegram message from {} ({}) in chat {}: {}",
        incoming.user_name, incoming.user_id, incoming.chat_id, incoming.text
    );

    let platform = TelegramPlatform::new(bot);
    app.handle_message(&platform, &incoming).await
}
