//! One ad-generation session: examples, concept, background, refinement.

use crate::refinement::{RefinementLoop, RefinementOutcome};
use crate::stages;
use adgen_core::{
    AdConcept, AdConceptGenerator, AdExampleSource, AdGenError, ImageBase64, ImageGenerator,
    Notifier, PublishResult, Publisher, Result, notify_best_effort,
};
use adgen_telemetry::session_span;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Appended to every background prompt.
pub const BACKGROUND_PROMPT_SUFFIX: &str = " No text should be shown anywhere in the image. Text is forbidden in this image. Return the image in the dimensions 1024 x 1024.";

pub fn background_prompt(description: &str) -> String {
    format!("{description}{BACKGROUND_PROMPT_SUFFIX}")
}

pub fn full_ad_prompt(description: &str) -> String {
    format!("Generate an image based on the following image description: {description}.")
}

/// Everything a finished session produced.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub session_id: String,
    pub company_id: i64,
    pub company_name: Option<String>,
    pub example_count: usize,
    pub concept: AdConcept,
    pub background: ImageBase64,
    /// Full-ad image generated from the concept, when enabled.
    pub preview: Option<ImageBase64>,
    /// Publication of the unrefined concept, when enabled.
    pub initial_publication: Option<PublishResult>,
    pub refinement: RefinementOutcome,
}

/// Drives a session from a company id to a refined layout.
///
/// Example retrieval and the company name lookup degrade to nothing on
/// failure. Concept and background generation failures end the session.
pub struct AdPipeline {
    examples: Option<Arc<dyn AdExampleSource>>,
    concept: Arc<dyn AdConceptGenerator>,
    images: Arc<dyn ImageGenerator>,
    notifier: Option<Arc<dyn Notifier>>,
    refinement: RefinementLoop,
    full_ad_preview: bool,
    publish_initial: bool,
}

impl AdPipeline {
    pub fn new(
        concept: Arc<dyn AdConceptGenerator>,
        images: Arc<dyn ImageGenerator>,
        refinement: RefinementLoop,
    ) -> Self {
        Self {
            examples: None,
            concept,
            images,
            notifier: None,
            refinement,
            full_ad_preview: false,
            publish_initial: false,
        }
    }

    pub fn with_examples(mut self, source: Arc<dyn AdExampleSource>) -> Self {
        self.examples = Some(source);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_full_ad_preview(mut self, enabled: bool) -> Self {
        self.full_ad_preview = enabled;
        self
    }

    /// Publish the initial concept (finalized) before refinement starts,
    /// through the refinement loop's publisher.
    pub fn with_publish_initial(mut self, enabled: bool) -> Self {
        self.publish_initial = enabled;
        self
    }

    pub fn refinement(&self) -> &RefinementLoop {
        &self.refinement
    }

    pub async fn run(&self, company_id: i64) -> Result<SessionOutcome> {
        let session_id = Uuid::new_v4().to_string();
        let span = session_span(&session_id, company_id);
        self.run_session(session_id, company_id).instrument(span).await
    }

    async fn run_session(&self, session_id: String, company_id: i64) -> Result<SessionOutcome> {
        let initial_publisher = self.initial_publisher()?;
        let examples = self.load_examples(company_id).await;
        let company_name = self.load_company_name(company_id).await;

        let concept = self.concept.generate(company_name.as_deref(), &examples).await?;
        tracing::info!(
            layers = concept.layers.len(),
            examples = examples.len(),
            "Ad concept generated"
        );

        let prompt = background_prompt(&concept.background_description);
        let background = self.images.generate(&prompt).await?;
        notify_best_effort(self.notifier.as_deref(), &background, &prompt).await;

        let preview = if self.full_ad_preview {
            let image = self.images.generate(&full_ad_prompt(&concept.full_ad_description)).await?;
            notify_best_effort(self.notifier.as_deref(), &image, &concept.full_ad_description).await;
            Some(image)
        } else {
            None
        };

        let layout = concept.layout();
        let initial_publication = match initial_publisher {
            Some(publisher) => Some(stages::publish(publisher, &layout, &background, 0).await?),
            None => None,
        };

        let refinement = self.refinement.run(layout, background.clone()).await?;

        Ok(SessionOutcome {
            session_id,
            company_id,
            company_name,
            example_count: examples.len(),
            concept,
            background,
            preview,
            initial_publication,
            refinement,
        })
    }

    fn initial_publisher(&self) -> Result<Option<&dyn Publisher>> {
        if !self.publish_initial {
            return Ok(None);
        }
        match self.refinement.publisher() {
            Some(publisher) => Ok(Some(publisher.as_ref())),
            None => Err(AdGenError::Config(
                "initial publication enabled but no publisher configured".to_string(),
            )),
        }
    }

    async fn load_examples(&self, company_id: i64) -> Vec<String> {
        let Some(source) = &self.examples else {
            tracing::info!(company_id, "No example source configured; using zero examples");
            return Vec::new();
        };
        match source.top_ad_descriptions(company_id).await {
            Ok(examples) => examples,
            Err(e) => {
                tracing::warn!(company_id, stage = "examples", error = %e, "Example retrieval failed; using zero examples");
                Vec::new()
            }
        }
    }

    async fn load_company_name(&self, company_id: i64) -> Option<String> {
        let source = self.examples.as_ref()?;
        match source.company_name(company_id).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(company_id, error = %e, "Company lookup failed");
                None
            }
        }
    }
}
