use anyhow::{bail, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub openai: OpenAiConfig,
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone)]
pub struct OpenAiConfig {
    /// `None` puts story generation into permanent fallback mode.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    /// Read `BOT_TOKEN` and `OPENAI_API_KEY` from the process environment.
    ///
    /// Empty or whitespace-only values count as unset: a blank `BOT_TOKEN` is
    /// an error, a blank `OPENAI_API_KEY` leaves story generation on the fallback.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(bot_token) = non_empty("BOT_TOKEN") else {
            bail!("No BOT_TOKEN provided");
        };

        Ok(Self {
            telegram: TelegramConfig { bot_token },
            openai: OpenAiConfig::new(non_empty("OPENAI_API_KEY")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_bot_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap_err();
        assert_eq!(err.to_string(), "No BOT_TOKEN provided");
    }

    #[test]
    fn test_empty_bot_token_is_fatal() {
        assert!(Config::from_lookup(lookup_from(&[("BOT_TOKEN", "  ")])).is_err());
    }

    #[test]
    fn test_openai_key_is_optional() {
        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert!(config.openai.api_key.is_none());

        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "123:abc"),
            ("OPENAI_API_KEY", ""),
        ]))
        .unwrap();
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_openai_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "123:abc"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.openai.max_tokens, 150);
        assert_eq!(config.openai.timeout, Duration::from_secs(10));
        assert_eq!(
            config.openai.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_whitespace_openai_key_is_unset() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "123:abc"),
            ("OPENAI_API_KEY", " \t "),
        ]))
        .unwrap();
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_bot_token() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "123456:secret-bot-token"),
            ("OPENAI_API_KEY", "sk-super-secret"),
        ]))
        .unwrap();
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("secret-bot-token"));
        assert!(!debug_output.contains("sk-super-secret"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let openai = OpenAiConfig::new(Some("sk-super-secret".to_string()));
        let debug_output = format!("{:?}", openai);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk-super-secret"));
    }
}
