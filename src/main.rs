mod bot;
mod config;
mod invert;
mod platform;
mod router;
mod story;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::App;
use crate::config::Config;
use crate::router::MessageRouter;
use crate::story::StoryGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storybot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    info!("Configuration loaded");
    info!("  Model: {}", config.openai.model);
    if config.openai.api_key.is_none() {
        info!("  OPENAI_API_KEY not set, stories will use the fallback text");
    }

    let story = StoryGenerator::new(config.openai.clone())?;
    let app = Arc::new(App::new(MessageRouter::default(), story));

    info!("Bot is starting...");
    platform::telegram::run(app, &config.telegram.bot_token).await?;

    Ok(())
}
