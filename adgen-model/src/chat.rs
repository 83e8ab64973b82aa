//! Provider-neutral chat completion types.

use adgen_core::{ImageBase64, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One piece of a multimodal message.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    Image(ImageBase64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<ContentPart>,
}

impl ChatMessage {
    pub fn new(role: Role) -> Self {
        Self { role, parts: Vec::new() }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System).with_text(text)
    }

    pub fn user() -> Self {
        Self::new(Role::User)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(ContentPart::Text(text.into()));
        self
    }

    pub fn with_image(mut self, image: ImageBase64) -> Self {
        self.parts.push(ContentPart::Image(image));
        self
    }

    /// Text parts joined with newlines; images are skipped.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn image_count(&self) -> usize {
        self.parts.iter().filter(|part| matches!(part, ContentPart::Image(_))).count()
    }
}

/// JSON schema the answer must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: Value,
}

impl ResponseSchema {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self { name: name.into(), schema }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub response_schema: Option<ResponseSchema>,
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages, response_schema: None, temperature: None }
    }

    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn image_count(&self) -> usize {
        self.messages.iter().map(ChatMessage::image_count).sum()
    }
}

/// A chat model returning the assistant's text answer.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builders() {
        let message = ChatMessage::user()
            .with_text("Current ad:")
            .with_image(ImageBase64::new("QUJD"))
            .with_text("Background:")
            .with_image(ImageBase64::new("REVG"));
        assert_eq!(message.role, Role::User);
        assert_eq!(message.parts.len(), 4);
        assert_eq!(message.image_count(), 2);
        assert_eq!(message.text(), "Current ad:\nBackground:");
    }

    #[test]
    fn test_request_counts_images_across_messages() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("You review ads."),
            ChatMessage::user().with_image(ImageBase64::new("QUJD")),
        ])
        .with_temperature(0.9);
        assert_eq!(request.image_count(), 1);
        assert_eq!(request.temperature, Some(0.9));
    }
}
