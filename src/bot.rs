use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::invert::invert;
use crate::platform::{ChatPlatform, IncomingMessage};
use crate::router::{MessageRouter, Route};
use crate::story::StoryGenerator;

const PLACEHOLDER_TEXT: &str = "Generating a sci-fi story for you...";
const PLACEHOLDER_FAILED_TEXT: &str = "Error: Unable to generate story at this time.";

/// Shared application state
pub struct App {
    router: MessageRouter,
    story: StoryGenerator,
}

impl App {
    pub fn new(router: MessageRouter, story: StoryGenerator) -> Self {
        Self { router, story }
    }

    /// Route a message and run its handler. Unmatched messages are dropped.
    pub async fn handle_message(
        &self,
        platform: &dyn ChatPlatform,
        msg: &IncomingMessage,
    ) -> Result<()> {
        match self.router.route(msg) {
            Some(Route::Story) => self.handle_story(platform, msg).await,
            Some(Route::Invert) => handle_invert(platform, msg).await,
            None => Ok(()),
        }
    }

    async fn handle_story(&self, platform: &dyn ChatPlatform, msg: &IncomingMessage) -> Result<()> {
        info!(
            "Story command triggered by user {} ({})",
            msg.user_id, msg.user_name
        );

        let placeholder = match platform.reply(msg, PLACEHOLDER_TEXT).await {
            Ok(sent) => sent,
            Err(e) => {
                error!("Failed to send placeholder message: {:#}", e);
                if let Err(e) = platform.reply(msg, PLACEHOLDER_FAILED_TEXT).await {
                    warn!("Failed to send error reply: {:#}", e);
                }
                return Err(e).context("Failed to send placeholder message");
            }
        };

        let story = self.story.generate().await;

        if let Err(e) = platform.edit(&placeholder, &story).await {
            error!("Failed to edit placeholder message: {:#}", e);
            if let Err(e) = platform.reply(msg, &story).await {
                warn!("Failed to send story as a new reply: {:#}", e);
            }
            return Err(e).context("Failed to edit placeholder message");
        }

        info!("Story command completed for chat {}", msg.chat_id);
        Ok(())
    }
}

async fn handle_invert(platform: &dyn ChatPlatform, msg: &IncomingMessage) -> Result<()> {
    info!("Inverting message from {}: '{}'", msg.user_name, msg.text);
    platform
        .reply(msg, &invert(&msg.text))
        .await
        .context("Failed to send inverted message")?;
    Ok(())
}
