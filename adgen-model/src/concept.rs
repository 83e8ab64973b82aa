use crate::chat::{ChatMessage, ChatModel, ChatRequest};
use crate::prompts;
use crate::schema;
use crate::structured::parse_structured;
use adgen_core::{AdConcept, AdConceptGenerator, AdGenError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Sampling temperature for first drafts.
pub const CONCEPT_TEMPERATURE: f32 = 0.9;

/// [`AdConceptGenerator`] backed by a chat model.
pub struct LlmConceptGenerator {
    model: Arc<dyn ChatModel>,
    temperature: f32,
}

impl LlmConceptGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model, temperature: CONCEPT_TEMPERATURE }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_request(&self, company_name: Option<&str>, examples: &[String]) -> ChatRequest {
        let mut message = ChatMessage::user();
        if let Some(name) = company_name {
            message = message.with_text(format!("The ad is for {name}."));
        }
        message = if examples.is_empty() {
            message.with_text(prompts::NO_EXAMPLES)
        } else {
            message
                .with_text(
                    "Please return the new ad in the specified format. Below are descriptions \
                     of the company's best-performing ads.",
                )
                .with_text(examples.join("\n\n"))
        };

        ChatRequest::new(vec![ChatMessage::system(prompts::CONCEPT_SYSTEM), message])
            .with_schema(schema::ad_concept())
            .with_temperature(self.temperature)
    }
}

#[async_trait]
impl AdConceptGenerator for LlmConceptGenerator {
    async fn generate(&self, company_name: Option<&str>, examples: &[String]) -> Result<AdConcept> {
        let raw = self.model.complete(self.build_request(company_name, examples)).await?;
        let concept: AdConcept = parse_structured(&raw)?;
        if concept.background_description.trim().is_empty() {
            return Err(AdGenError::Llm("concept has an empty background description".into()));
        }
        tracing::info!(
            examples = examples.len(),
            layers = concept.layers.len(),
            "Initial ad concept generated"
        );
        Ok(concept)
    }
}
