use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::OpenAiConfig;

pub const FALLBACK_STORY: &str = "THE LAST MESSAGE: In 2157, Earth received a cryptic signal \
from deep space. Scientists scrambled to decode it as strange phenomena plagued the planet. \
When they finally understood, it was too late. The message was a timer, counting down to \
something inevitable. Humanity had received its eviction notice.";

const SYSTEM_PROMPT: &str = "You are a creative sci-fi writer. Keep responses under 400 characters.";

const USER_PROMPT: &str = "Write a creative sci-fi micro-story in exactly 400 characters. \
Make it engaging with a beginning, middle and end.";

#[derive(Debug, Serialize)]
struct PromptMessage {
    role: &'static str,
    content: &'static str,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    messages: Vec<PromptMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Error)]
enum GenerationError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("OpenAI API error ({0})")]
    Status(reqwest::StatusCode),
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("no choices in response")]
    NoChoices,
}

/// Generates sci-fi micro-stories through the OpenAI chat completions API.
pub struct StoryGenerator {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl StoryGenerator {
    pub fn new(config: OpenAiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    /// Always yields a story: any failure is logged and replaced by [`FALLBACK_STORY`].
    pub async fn generate(&self) -> String {
        match self.request_story().await {
            Ok(story) => {
                info!("Story generated successfully, length: {} chars", story.chars().count());
                story
            }
            Err(GenerationError::MissingApiKey) => {
                info!("OPENAI_API_KEY not set, using fallback story");
                FALLBACK_STORY.to_string()
            }
            Err(e) => {
                warn!("Story generation failed, using fallback story: {}", e);
                FALLBACK_STORY.to_string()
            }
        }
    }

    async fn request_story(&self) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        debug!("Using OpenAI API key: {}", mask_key(api_key));

        let request = GenerationRequest {
            model: &self.config.model,
            messages: vec![
                PromptMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                PromptMessage {
                    role: "user",
                    content: USER_PROMPT,
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        let url = self.config.completions_url();
        debug!("Sending request to OpenAI: {} {:?}", url, request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("OpenAI response ({}): {}", status, body);

        if status != reqwest::StatusCode::OK {
            return Err(GenerationError::Status(status));
        }

        let parsed: GenerationResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GenerationError::NoChoices)
    }
}

/// Show only the first 10 and last 5 characters of a credential.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 15 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{}...{}", head, tail)
}
