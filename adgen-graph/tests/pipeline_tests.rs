mod common;

use adgen_core::{
    AdConcept, AdConceptGenerator, AdExampleSource, AdGenError, ImageBase64, ImageGenerator,
    Result,
};
use adgen_graph::{AdPipeline, BACKGROUND_PROMPT_SUFFIX, LoopPolicy, RefinementLoop};
use async_trait::async_trait;
use common::*;
use std::sync::{Arc, Mutex};

struct StaticExamples {
    descriptions: Vec<String>,
    name: Option<String>,
    fail: bool,
}

impl StaticExamples {
    fn empty() -> Self {
        Self { descriptions: Vec::new(), name: None, fail: false }
    }

    fn failing() -> Self {
        Self { descriptions: Vec::new(), name: None, fail: true }
    }
}

#[async_trait]
impl AdExampleSource for StaticExamples {
    async fn top_ad_descriptions(&self, _company_id: i64) -> Result<Vec<String>> {
        if self.fail {
            return Err(AdGenError::DataSource("connection refused".into()));
        }
        Ok(self.descriptions.clone())
    }

    async fn company_name(&self, _company_id: i64) -> Result<Option<String>> {
        if self.fail {
            return Err(AdGenError::DataSource("connection refused".into()));
        }
        Ok(self.name.clone())
    }
}

#[derive(Default)]
struct RecordingConcepts {
    fail: bool,
    seen: Mutex<Vec<(Option<String>, Vec<String>)>>,
}

#[async_trait]
impl AdConceptGenerator for RecordingConcepts {
    async fn generate(&self, company_name: Option<&str>, examples: &[String]) -> Result<AdConcept> {
        self.seen.lock().unwrap().push((company_name.map(str::to_string), examples.to_vec()));
        if self.fail {
            return Err(AdGenError::Llm("structured output rejected".into()));
        }
        Ok(AdConcept {
            background_description: "A sunlit beach with soft waves.".into(),
            full_ad_description: "Sneakers on a sunlit beach with a bold headline.".into(),
            layers: headline("Summer Sale").layers,
        })
    }
}

#[derive(Default)]
struct RecordingImages {
    fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingImages {
    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for RecordingImages {
    async fn generate(&self, prompt: &str) -> Result<ImageBase64> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(AdGenError::ImageGeneration("No image data received".into()));
        }
        Ok(background())
    }
}

struct Fixture {
    concepts: Arc<RecordingConcepts>,
    images: Arc<RecordingImages>,
    critic: Arc<ScriptedCritic>,
}

impl Fixture {
    fn new(concepts: RecordingConcepts, images: RecordingImages) -> Self {
        Self {
            concepts: Arc::new(concepts),
            images: Arc::new(images),
            critic: Arc::new(ScriptedCritic::default()),
        }
    }

    fn pipeline(&self, max_iterations: usize) -> AdPipeline {
        let refinement = RefinementLoop::new(
            Arc::new(ScriptedRenderer::default()),
            self.critic.clone(),
            Arc::new(ScriptedReviser::default()),
            LoopPolicy::binary_review().with_max_iterations(max_iterations),
        );
        AdPipeline::new(self.concepts.clone(), self.images.clone(), refinement)
    }

    fn publishing_pipeline(&self, publisher: Arc<RecordingPublisher>) -> AdPipeline {
        let refinement = RefinementLoop::new(
            Arc::new(ScriptedRenderer::default()),
            self.critic.clone(),
            Arc::new(ScriptedReviser::default()),
            LoopPolicy::binary_review().with_max_iterations(0),
        )
        .with_publisher(publisher);
        AdPipeline::new(self.concepts.clone(), self.images.clone(), refinement)
    }
}

#[tokio::test]
async fn test_company_without_ads_still_gets_initial_layout() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let pipeline = fixture.pipeline(0).with_examples(Arc::new(StaticExamples::empty()));

    let outcome = pipeline.run(42).await.unwrap();

    assert_eq!(outcome.company_id, 42);
    assert_eq!(outcome.example_count, 0);
    assert_eq!(outcome.refinement.layout, headline("Summer Sale"));
    assert_eq!(outcome.refinement.layout.width, 1024);
    assert_eq!(outcome.background, background());

    let seen = fixture.concepts.seen.lock().unwrap().clone();
    assert_eq!(seen, vec![(None, Vec::<String>::new())]);
}

#[tokio::test]
async fn test_background_prompt_forbids_text() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());

    fixture.pipeline(0).run(7).await.unwrap();

    let prompts = fixture.images.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("A sunlit beach with soft waves."));
    assert!(prompts[0].ends_with(BACKGROUND_PROMPT_SUFFIX));
}

#[tokio::test]
async fn test_data_source_failure_degrades_to_no_examples() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let pipeline = fixture.pipeline(1).with_examples(Arc::new(StaticExamples::failing()));

    let outcome = pipeline.run(7).await.unwrap();

    assert_eq!(outcome.example_count, 0);
    assert!(outcome.company_name.is_none());
    assert_eq!(outcome.refinement.iterations, 1);
}

#[tokio::test]
async fn test_examples_and_name_reach_concept_generator() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let source = StaticExamples {
        descriptions: vec!["Runner at dawn".into(), "Blender in a kitchen".into()],
        name: Some("Acme".into()),
        fail: false,
    };

    let outcome = fixture.pipeline(0).with_examples(Arc::new(source)).run(7).await.unwrap();

    assert_eq!(outcome.company_name.as_deref(), Some("Acme"));
    assert_eq!(outcome.example_count, 2);
    let seen = fixture.concepts.seen.lock().unwrap().clone();
    assert_eq!(seen[0].0.as_deref(), Some("Acme"));
    assert_eq!(seen[0].1, vec!["Runner at dawn", "Blender in a kitchen"]);
}

#[tokio::test]
async fn test_concept_failure_ends_session() {
    let fixture = Fixture::new(
        RecordingConcepts { fail: true, ..Default::default() },
        RecordingImages::default(),
    );

    let err = fixture.pipeline(3).run(7).await.unwrap_err();

    assert!(matches!(err, AdGenError::Llm(_)));
    assert!(fixture.images.prompts().is_empty());
    assert_eq!(fixture.critic.calls(), 0);
}

#[tokio::test]
async fn test_background_failure_ends_session() {
    let fixture = Fixture::new(
        RecordingConcepts::default(),
        RecordingImages { fail: true, ..Default::default() },
    );

    let err = fixture.pipeline(3).run(7).await.unwrap_err();

    assert!(matches!(err, AdGenError::ImageGeneration(_)));
    assert_eq!(fixture.critic.calls(), 0);
}

#[tokio::test]
async fn test_full_ad_preview_is_generated_and_forwarded() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline =
        fixture.pipeline(0).with_full_ad_preview(true).with_notifier(notifier.clone());

    let outcome = pipeline.run(7).await.unwrap();

    assert!(outcome.preview.is_some());
    let prompts = fixture.images.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(
        prompts[1],
        "Generate an image based on the following image description: Sneakers on a sunlit beach with a bold headline.."
    );
    let captions = notifier.captions();
    assert_eq!(captions.len(), 2);
    assert_eq!(captions[1], "Sneakers on a sunlit beach with a bold headline.");
}

#[tokio::test]
async fn test_sessions_get_distinct_ids() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let pipeline = fixture.pipeline(0);

    let (first, second) = tokio::join!(pipeline.run(1), pipeline.run(2));

    let (first, second) = (first.unwrap(), second.unwrap());
    assert_ne!(first.session_id, second.session_id);
    assert_eq!(first.company_id, 1);
    assert_eq!(second.company_id, 2);
}

#[tokio::test]
async fn test_initial_concept_is_published_before_refinement() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let pipeline = fixture.publishing_pipeline(publisher.clone()).with_publish_initial(true);

    let outcome = pipeline.run(7).await.unwrap();

    assert_eq!(publisher.published(), vec![(headline("Summer Sale"), background(), true)]);
    assert!(outcome.initial_publication.is_some());
    assert!(outcome.refinement.published.is_none());
}

#[tokio::test]
async fn test_initial_publication_off_by_default() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let publisher = Arc::new(RecordingPublisher::default());

    let outcome = fixture.publishing_pipeline(publisher.clone()).run(7).await.unwrap();

    assert!(publisher.published().is_empty());
    assert!(outcome.initial_publication.is_none());
}

#[tokio::test]
async fn test_initial_publication_without_publisher_is_config_error() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());

    let err = fixture.pipeline(0).with_publish_initial(true).run(7).await.unwrap_err();

    assert!(matches!(err, AdGenError::Config(_)));
    assert!(fixture.images.prompts().is_empty());
}

#[tokio::test]
async fn test_initial_publication_failure_ends_session() {
    let fixture = Fixture::new(RecordingConcepts::default(), RecordingImages::default());
    let publisher = Arc::new(RecordingPublisher::failing());
    let pipeline = fixture.publishing_pipeline(publisher.clone()).with_publish_initial(true);

    let err = pipeline.run(7).await.unwrap_err();

    assert!(matches!(err, AdGenError::Publish { status: Some(502), .. }));
    assert_eq!(publisher.published().len(), 1);
}
