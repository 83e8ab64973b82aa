use crate::chat::{ChatMessage, ChatModel, ChatRequest};
use crate::context;
use crate::prompts;
use crate::schema;
use crate::structured::parse_layers;
use adgen_core::{LayerReviser, Layout, Result, RevisionRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// [`LayerReviser`] backed by a vision-capable chat model.
pub struct LlmLayerReviser {
    model: Arc<dyn ChatModel>,
}

impl LlmLayerReviser {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    fn build_request(&self, request: &RevisionRequest<'_>) -> Result<ChatRequest> {
        let mut message = ChatMessage::user()
            .with_text(context::layers_text(request.layout)?)
            .with_text(format!("Here is the feedback received:\n\n{}", request.feedback));
        if let Some(digest) = context::feedback_digest(request.history) {
            message = message.with_text(digest);
        }
        let message =
            context::with_images(message, request.rendered, request.background, request.target);

        Ok(ChatRequest::new(vec![ChatMessage::system(prompts::REVISE_SYSTEM), message])
            .with_schema(schema::revised_layers()))
    }
}

#[async_trait]
impl LayerReviser for LlmLayerReviser {
    async fn revise(&self, request: &RevisionRequest<'_>) -> Result<Layout> {
        let raw = self.model.complete(self.build_request(request)?).await?;
        let layout = parse_layers(&raw, request.layout)?;
        tracing::debug!(iteration = request.iteration, layers = layout.layers.len(), "Layers revised");
        Ok(layout)
    }
}
