//! Configuration types for OpenAI-compatible chat and image endpoints.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default vision-capable chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4.1";

/// Default text-to-image model.
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

/// Configuration for chat completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
    /// Custom base URL for OpenAI-compatible providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Whole-request timeout. `None` leaves it to the transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            base_url: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), ..Default::default() }
    }

    /// Config for gpt-4.1.
    pub fn gpt41(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_CHAT_MODEL)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_API_BASE)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Configuration for `/images/generations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub api_key: String,
    pub model: String,
    pub size: String,
    pub quality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: "1024x1024".to_string(),
            quality: "auto".to_string(),
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl ImageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Default::default() }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_API_BASE)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let chat = OpenAIConfig::gpt41("sk-test");
        assert_eq!(chat.model, "gpt-4.1");
        assert_eq!(chat.effective_base_url(), OPENAI_API_BASE);
        assert!(chat.timeout().is_none());

        let image = ImageConfig::new("sk-test");
        assert_eq!(image.model, "gpt-image-1");
        assert_eq!(image.size, "1024x1024");
        assert_eq!(image.quality, "auto");
    }

    #[test]
    fn test_builders() {
        let chat = OpenAIConfig::gpt41("sk")
            .with_base_url("http://localhost:8080/v1")
            .with_max_tokens(4096)
            .with_timeout_secs(30);
        assert_eq!(chat.effective_base_url(), "http://localhost:8080/v1");
        assert_eq!(chat.max_tokens, Some(4096));
        assert_eq!(chat.timeout(), Some(Duration::from_secs(30)));
    }
}
