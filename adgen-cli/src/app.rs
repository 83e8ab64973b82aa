//! Wires the concrete adapters into a pipeline and runs a session.

use crate::cli::RunArgs;
use crate::config::AdGenConfig;
use adgen_core::{ImageBase64, Layout, Notifier};
use adgen_data::SupabaseAdSource;
use adgen_graph::{AdPipeline, RefinementLoop, SessionOutcome, StopReason};
use adgen_model::{
    ChatModel, LlmConceptGenerator, LlmLayerReviser, LlmVisionCritic, OpenAIChatClient,
    OpenAIImageGenerator,
};
use adgen_notify::SlackNotifier;
use adgen_render::RenderApiClient;
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// What `adgen run` prints when a session finishes.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub company_id: i64,
    pub company_name: Option<String>,
    pub examples: usize,
    pub iterations: usize,
    pub stop_reason: StopReason,
    pub fallbacks: usize,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<Value>,
}

impl From<&SessionOutcome> for SessionSummary {
    fn from(outcome: &SessionOutcome) -> Self {
        Self {
            session_id: outcome.session_id.clone(),
            company_id: outcome.company_id,
            company_name: outcome.company_name.clone(),
            examples: outcome.example_count,
            iterations: outcome.refinement.iterations,
            stop_reason: outcome.refinement.stop_reason,
            fallbacks: outcome.refinement.fallback_count(),
            layout: outcome.refinement.layout.clone(),
            published: outcome
                .refinement
                .published
                .as_ref()
                .and_then(|result| result.metadata())
                .cloned(),
        }
    }
}

pub async fn load_target(args: &RunArgs) -> anyhow::Result<Option<ImageBase64>> {
    let Some(path) = &args.target_image else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read target image {}", path.display()))?;
    Ok(Some(ImageBase64::from_bytes(&bytes)))
}

pub fn build_pipeline(
    config: &AdGenConfig,
    args: &RunArgs,
    target: Option<ImageBase64>,
) -> anyhow::Result<AdPipeline> {
    let policy = args.policy(target)?;

    let chat: Arc<dyn ChatModel> = Arc::new(OpenAIChatClient::new(config.chat_config())?);
    let images = Arc::new(OpenAIImageGenerator::new(config.image_config())?);
    let render = Arc::new(RenderApiClient::new(config.render_config())?);
    let notifier: Option<Arc<dyn Notifier>> = match config.slack_config() {
        Some(slack) => Some(Arc::new(SlackNotifier::new(slack)?)),
        None => None,
    };

    let mut refinement = RefinementLoop::new(
        render.clone(),
        Arc::new(LlmVisionCritic::new(chat.clone())),
        Arc::new(LlmLayerReviser::new(chat.clone())),
        policy,
    )
    .with_publisher(render);
    if let Some(notifier) = &notifier {
        refinement = refinement.with_notifier(notifier.clone());
    }

    let mut pipeline = AdPipeline::new(Arc::new(LlmConceptGenerator::new(chat)), images, refinement)
        .with_full_ad_preview(args.full_ad_preview)
        .with_publish_initial(args.publish_initial);
    if let Some(supabase) = config.supabase_config() {
        pipeline = pipeline.with_examples(Arc::new(SupabaseAdSource::new(supabase)?));
    }
    if let Some(notifier) = notifier {
        pipeline = pipeline.with_notifier(notifier);
    }
    Ok(pipeline)
}

pub async fn run_session(config: &AdGenConfig, args: &RunArgs) -> anyhow::Result<SessionSummary> {
    let target = load_target(args).await?;
    let pipeline = build_pipeline(config, args, target)?;
    tracing::info!(
        company_id = args.company_id,
        mode = ?args.mode,
        examples = config.supabase.is_some(),
        notifications = config.slack.is_some(),
        "Starting session"
    );
    let outcome = pipeline
        .run(args.company_id)
        .await
        .with_context(|| format!("Session for company {} failed", args.company_id))?;
    Ok(SessionSummary::from(&outcome))
}
