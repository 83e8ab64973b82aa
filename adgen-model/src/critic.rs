//! Vision critic backed by a chat model.

use crate::chat::{ChatMessage, ChatModel, ChatRequest};
use crate::context;
use crate::prompts;
use crate::schema;
use crate::structured::{parse_structured, parse_verdict};
use adgen_core::{Critique, CritiqueRequest, Result, Verdict, VisionCritic};
use async_trait::async_trait;
use std::sync::Arc;

/// [`VisionCritic`] that asks a vision-capable chat model for structured
/// answers. Failures are returned as-is; the refinement loop decides how to
/// degrade.
pub struct LlmVisionCritic {
    model: Arc<dyn ChatModel>,
}

impl LlmVisionCritic {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    fn verdict_request(&self, request: &CritiqueRequest<'_>) -> ChatRequest {
        let mut message = ChatMessage::user().with_text(prompts::REVIEW_REQUEST);
        if let Some(digest) = context::feedback_digest(request.history) {
            message = message.with_text(digest);
        }
        message = message.with_image(request.rendered.clone());
        if let Some(target) = request.target {
            message = message.with_text(prompts::TARGET).with_image(target.clone());
        }

        ChatRequest::new(vec![ChatMessage::system(prompts::REVIEW_SYSTEM), message])
            .with_schema(schema::verdict())
    }

    fn critique_request(&self, request: &CritiqueRequest<'_>) -> Result<ChatRequest> {
        let mut messages = vec![ChatMessage::system(prompts::CRITIQUE_SYSTEM)];
        messages.extend(context::replay(request.history)?);

        let mut message = ChatMessage::user();
        if !request.history.is_empty() {
            message = message.with_text(prompts::FOLLOW_UP);
        }
        message = message.with_text(context::layers_text(request.layout)?);
        messages.push(context::with_images(
            message,
            request.rendered,
            request.background,
            request.target,
        ));

        Ok(ChatRequest::new(messages).with_schema(schema::critique()))
    }
}

#[async_trait]
impl VisionCritic for LlmVisionCritic {
    async fn verdict(&self, request: &CritiqueRequest<'_>) -> Result<Verdict> {
        let raw = self.model.complete(self.verdict_request(request)).await?;
        let verdict = parse_verdict(&raw)?;
        tracing::debug!(
            iteration = request.iteration,
            positive = verdict.is_positive,
            "Verdict received"
        );
        Ok(verdict)
    }

    async fn critique_and_revise(&self, request: &CritiqueRequest<'_>) -> Result<Critique> {
        let chat_request = self.critique_request(request)?;
        let raw = self.model.complete(chat_request).await?;
        let critique: Critique = parse_structured(&raw)?;
        tracing::debug!(
            iteration = request.iteration,
            layers = critique.layers.len(),
            "Critique received"
        );
        Ok(critique)
    }
}
