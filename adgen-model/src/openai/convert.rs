//! Wire types for OpenAI-compatible chat completions and image generation.

use crate::chat::{ChatMessage, ChatRequest, ContentPart, ResponseSchema, Role};
use adgen_core::{AdGenError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

/// Plain string for text-only messages, part list otherwise.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<Part>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<ImageDatum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageDatum {
    #[serde(default)]
    pub b64_json: Option<String>,
}

pub fn message_to_wire(message: &ChatMessage) -> Message {
    let role = match message.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
    .to_string();

    let content = match message.parts.as_slice() {
        [ContentPart::Text(text)] => MessageContent::Text(text.clone()),
        parts => MessageContent::Parts(
            parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text(text) => Part::Text { text: text.clone() },
                    ContentPart::Image(image) => {
                        Part::ImageUrl { image_url: ImageUrl { url: image.to_data_url() } }
                    }
                })
                .collect(),
        ),
    };

    Message { role, content }
}

pub fn response_format(schema: &ResponseSchema) -> ResponseFormat {
    ResponseFormat {
        format_type: "json_schema".to_string(),
        json_schema: JsonSchemaFormat {
            name: schema.name.clone(),
            schema: schema.schema.clone(),
            strict: true,
        },
    }
}

pub fn build_request(model: &str, max_tokens: Option<u32>, request: &ChatRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: request.messages.iter().map(message_to_wire).collect(),
        temperature: request.temperature,
        max_tokens,
        response_format: request.response_schema.as_ref().map(response_format),
    }
}

/// Text of the first choice. Refusals, truncation and empty answers are errors.
pub fn response_text(response: ChatCompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AdGenError::Llm("response contained no choices".to_string()))?;

    if choice.finish_reason.as_deref() == Some("length") {
        return Err(AdGenError::Llm("response truncated at max_tokens".to_string()));
    }

    let message =
        choice.message.ok_or_else(|| AdGenError::Llm("choice contained no message".to_string()))?;
    if let Some(refusal) = message.refusal {
        return Err(AdGenError::Llm(format!("model refused: {refusal}")));
    }
    match message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(AdGenError::Llm("empty response content".to_string())),
    }
}
