//! The individual stages of one refinement iteration.
//!
//! Rendering is the only stage whose failure ends the run. Critique and
//! revision failures fall back to a conservative value and are logged with
//! the iteration and stage.

use adgen_core::{
    AdGenError, Critique, CritiqueRequest, ImageBase64, LayerReviser, Layout, Publisher,
    PublishResult, RenderClient, Result, RevisionRequest, Verdict, VisionCritic,
};
use adgen_telemetry::stage_span;
use tracing::Instrument;

pub const RENDER: &str = "render";
pub const CRITIQUE: &str = "critique";
pub const REVISE: &str = "revise";
pub const PUBLISH: &str = "publish";

/// Value of a recoverable stage plus the error it recovered from, if any.
#[derive(Debug)]
pub struct Recovered<T> {
    pub value: T,
    pub error: Option<AdGenError>,
}

impl<T> Recovered<T> {
    fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    fn fallback(value: T, error: AdGenError) -> Self {
        Self { value, error: Some(error) }
    }
}

pub async fn render(
    client: &dyn RenderClient,
    layout: &Layout,
    background: &ImageBase64,
    iteration: usize,
) -> Result<ImageBase64> {
    let result = client.render(layout, background).instrument(stage_span(RENDER, iteration)).await;
    match result {
        Ok(image) => {
            tracing::debug!(iteration, stage = RENDER, layers = layout.layers.len(), "Rendered ad");
            Ok(image)
        }
        Err(e) => {
            tracing::error!(iteration, stage = RENDER, error = %e, "Render failed; aborting");
            Err(e)
        }
    }
}

/// Binary critique. A failure yields [`Verdict::failure`].
pub async fn verdict(critic: &dyn VisionCritic, request: &CritiqueRequest<'_>) -> Recovered<Verdict> {
    let iteration = request.iteration;
    match critic.verdict(request).instrument(stage_span(CRITIQUE, iteration)).await {
        Ok(verdict) => {
            tracing::info!(
                iteration,
                stage = CRITIQUE,
                positive = verdict.is_positive,
                "Critic verdict received"
            );
            Recovered::ok(verdict)
        }
        Err(e) => {
            tracing::warn!(iteration, stage = CRITIQUE, error = %e, "Critique failed; using failure verdict");
            Recovered::fallback(Verdict::failure(), e)
        }
    }
}

/// Direct-revise critique. A failure yields `None`; the caller keeps the
/// current layout.
pub async fn critique(
    critic: &dyn VisionCritic,
    request: &CritiqueRequest<'_>,
) -> Recovered<Option<Critique>> {
    let iteration = request.iteration;
    match critic.critique_and_revise(request).instrument(stage_span(CRITIQUE, iteration)).await {
        Ok(critique) => {
            tracing::info!(
                iteration,
                stage = CRITIQUE,
                layers = critique.layers.len(),
                "Critique received"
            );
            Recovered::ok(Some(critique))
        }
        Err(e) => {
            tracing::warn!(iteration, stage = CRITIQUE, error = %e, "Critique failed; keeping layout");
            Recovered::fallback(None, e)
        }
    }
}

/// Layer revision. A failure yields the unmodified current layout.
pub async fn revise(reviser: &dyn LayerReviser, request: &RevisionRequest<'_>) -> Recovered<Layout> {
    let iteration = request.iteration;
    match reviser.revise(request).instrument(stage_span(REVISE, iteration)).await {
        Ok(layout) => {
            tracing::info!(iteration, stage = REVISE, layers = layout.layers.len(), "Layers revised");
            Recovered::ok(layout)
        }
        Err(e) => {
            tracing::warn!(iteration, stage = REVISE, error = %e, "Revision failed; keeping layout");
            Recovered::fallback(request.layout.clone(), e)
        }
    }
}

pub async fn publish(
    publisher: &dyn Publisher,
    layout: &Layout,
    background: &ImageBase64,
    iteration: usize,
) -> Result<PublishResult> {
    let result = publisher
        .publish(layout, background, true)
        .instrument(stage_span(PUBLISH, iteration))
        .await;
    match &result {
        Ok(_) => tracing::info!(iteration, stage = PUBLISH, "Final ad published"),
        Err(e) => tracing::error!(iteration, stage = PUBLISH, error = %e, "Publishing failed"),
    }
    result
}
