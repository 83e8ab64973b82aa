//! HTTP clients for chat completions and image generation.

use super::config::{ImageConfig, OpenAIConfig};
use super::convert::{self, ChatCompletionResponse, ImageGenerationRequest, ImageGenerationResponse};
use crate::chat::{ChatModel, ChatRequest};
use adgen_core::{AdGenError, ImageBase64, ImageGenerator, Result};
use adgen_telemetry::model_call_span;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::Instrument;

fn http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| AdGenError::Config(format!("Failed to create HTTP client: {e}")))
}

/// Chat completions against OpenAI or any compatible provider.
///
/// # Example
///
/// ```rust,ignore
/// use adgen_model::openai::{OpenAIChatClient, OpenAIConfig};
///
/// let client = OpenAIChatClient::new(OpenAIConfig::gpt41(
///     std::env::var("OPENAI_API_KEY").unwrap()
/// ))?;
/// ```
pub struct OpenAIChatClient {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIChatClient {
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = http_client(config.timeout())?;
        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.effective_base_url().trim_end_matches('/'))
    }

    async fn send(&self, request: &ChatRequest) -> Result<String> {
        let body = convert::build_request(&self.config.model, self.config.max_tokens, request);
        tracing::debug!(
            messages = body.messages.len(),
            images = request.image_count(),
            "Sending chat completion"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdGenError::Llm(format!("Chat API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdGenError::Llm(format!("Chat API error ({status}): {error_text}")));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AdGenError::Llm(format!("Malformed chat response: {e}")))?;
        convert::response_text(parsed)
    }
}

#[async_trait]
impl ChatModel for OpenAIChatClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.send(&request).instrument(model_call_span(&self.config.model)).await
    }
}

/// Text-to-image via `/images/generations`.
pub struct OpenAIImageGenerator {
    client: Client,
    config: ImageConfig,
}

impl OpenAIImageGenerator {
    pub fn new(config: ImageConfig) -> Result<Self> {
        let client = http_client(config.timeout())?;
        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!("{}/images/generations", self.config.effective_base_url().trim_end_matches('/'))
    }

    async fn send(&self, prompt: &str) -> Result<ImageBase64> {
        let body = ImageGenerationRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: self.config.size.clone(),
            quality: self.config.quality.clone(),
        };

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdGenError::ImageGeneration(format!("Image API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdGenError::ImageGeneration(format!(
                "Image API error ({status}): {error_text}"
            )));
        }

        let parsed: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| AdGenError::ImageGeneration(format!("Malformed image response: {e}")))?;

        parsed
            .data
            .into_iter()
            .find_map(|datum| datum.b64_json)
            .filter(|b64| !b64.is_empty())
            .map(ImageBase64::new)
            .ok_or_else(|| AdGenError::ImageGeneration("No image data received".to_string()))
    }
}

#[async_trait]
impl ImageGenerator for OpenAIImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<ImageBase64> {
        self.send(prompt).instrument(model_call_span(&self.config.model)).await
    }
}
