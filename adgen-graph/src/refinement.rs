//! The render / critique / revise loop.

use crate::events::{LoopEvent, StopReason};
use crate::policy::{CriticMode, LoopPolicy};
use crate::stages::{self, CRITIQUE, REVISE};
use crate::state::RefinementState;
use adgen_core::{
    AdGenError, CRITIQUE_FAILURE_FEEDBACK, FeedbackEntry, ImageBase64, LayerReviser, Layout, Notifier, PublishResult,
    Publisher, RenderClient, Result, VisionCritic, notify_best_effort,
};
use std::sync::Arc;

/// Result of one completed loop run.
#[derive(Debug, Clone)]
pub struct RefinementOutcome {
    /// Final layout.
    pub layout: Layout,
    /// Render of [`Self::layout`].
    pub rendered: ImageBase64,
    /// Completed critique/revise cycles.
    pub iterations: usize,
    pub stop_reason: StopReason,
    /// Retained critiques, oldest first.
    pub history: Vec<FeedbackEntry>,
    pub events: Vec<LoopEvent>,
    pub published: Option<PublishResult>,
}

impl RefinementOutcome {
    pub fn fallback_count(&self) -> usize {
        self.events.iter().filter(|event| event.is_fallback()).count()
    }
}

/// Iteratively improves a layout against a fixed background.
///
/// Dependencies are shared read-only, so one loop can serve any number of
/// concurrent runs; each run owns its own [`RefinementState`].
///
/// Each pass renders the current layout, stops if the iteration cap is
/// reached, then critiques. In [`CriticMode::Binary`] a positive verdict
/// stops the run, otherwise the reviser produces the next layout. In
/// [`CriticMode::DirectRevise`] the critic's layers become the next layout.
pub struct RefinementLoop {
    renderer: Arc<dyn RenderClient>,
    critic: Arc<dyn VisionCritic>,
    reviser: Arc<dyn LayerReviser>,
    publisher: Option<Arc<dyn Publisher>>,
    notifier: Option<Arc<dyn Notifier>>,
    policy: LoopPolicy,
}

impl RefinementLoop {
    pub fn new(
        renderer: Arc<dyn RenderClient>,
        critic: Arc<dyn VisionCritic>,
        reviser: Arc<dyn LayerReviser>,
        policy: LoopPolicy,
    ) -> Self {
        Self { renderer, critic, reviser, publisher: None, notifier: None, policy }
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn policy(&self) -> &LoopPolicy {
        &self.policy
    }

    pub fn publisher(&self) -> Option<&Arc<dyn Publisher>> {
        self.publisher.as_ref()
    }

    pub async fn run(&self, layout: Layout, background: ImageBase64) -> Result<RefinementOutcome> {
        let publisher = match (self.policy.publish_on_completion, &self.publisher) {
            (true, None) => {
                return Err(AdGenError::Config(
                    "publication enabled but no publisher configured".to_string(),
                ));
            }
            (true, Some(publisher)) => Some(publisher.as_ref()),
            (false, _) => None,
        };

        let mut state = RefinementState::new(layout, background, &self.policy);
        let mut events = Vec::new();
        tracing::info!(
            mode = ?self.policy.critic_mode,
            max_iterations = self.policy.max_iterations,
            layers = state.layout.layers.len(),
            "Starting refinement"
        );

        let stop_reason = loop {
            state.rendered = stages::render(
                self.renderer.as_ref(),
                &state.layout,
                &state.background,
                state.iteration,
            )
            .await?;
            events.push(LoopEvent::rendered(state.iteration));

            if self.policy.notify_renders {
                notify_best_effort(self.notifier.as_deref(), &state.rendered, &state.caption())
                    .await;
            }

            if state.iteration >= self.policy.max_iterations {
                break StopReason::MaxIterations;
            }

            match self.policy.critic_mode {
                CriticMode::Binary => {
                    if let Some(reason) = self.binary_pass(&mut state, &mut events).await {
                        break reason;
                    }
                }
                CriticMode::DirectRevise => self.direct_pass(&mut state, &mut events).await,
            }
        };

        tracing::info!(iterations = state.iteration, reason = ?stop_reason, "Refinement finished");
        events.push(LoopEvent::done(state.iteration, stop_reason));

        let published = match publisher {
            Some(publisher) => {
                let result =
                    stages::publish(publisher, &state.layout, &state.background, state.iteration)
                        .await?;
                events.push(LoopEvent::published(result.metadata().cloned()));
                Some(result)
            }
            None => None,
        };

        Ok(RefinementOutcome {
            iterations: state.iteration,
            history: state.history.iter().cloned().collect(),
            layout: state.layout,
            rendered: state.rendered,
            stop_reason,
            events,
            published,
        })
    }

    /// Verdict, then revision on rejection. Returns a stop reason when the
    /// critic approves.
    async fn binary_pass(
        &self,
        state: &mut RefinementState,
        events: &mut Vec<LoopEvent>,
    ) -> Option<StopReason> {
        let iteration = state.iteration;
        let verdict = stages::verdict(self.critic.as_ref(), &state.critique_request()).await;
        if let Some(e) = &verdict.error {
            events.push(LoopEvent::fallback(iteration, CRITIQUE, &e.to_string()));
        }
        let verdict = verdict.value;
        events.push(LoopEvent::verdict(iteration, verdict.is_positive, &verdict.feedback_text));
        if verdict.is_positive {
            return Some(StopReason::Approved);
        }

        let revised =
            stages::revise(self.reviser.as_ref(), &state.revision_request(&verdict.feedback_text))
                .await;
        match &revised.error {
            Some(e) => events.push(LoopEvent::fallback(iteration, REVISE, &e.to_string())),
            None => events.push(LoopEvent::revised(iteration, revised.value.layers.len())),
        }
        state.advance(verdict.feedback_text, revised.value);
        None
    }

    async fn direct_pass(&self, state: &mut RefinementState, events: &mut Vec<LoopEvent>) {
        let iteration = state.iteration;
        let critique = stages::critique(self.critic.as_ref(), &state.critique_request()).await;
        match (critique.value, critique.error) {
            (Some(critique), _) => {
                events.push(LoopEvent::critiqued(iteration, &critique.fixes, critique.layers.len()));
                let layout = state.layout.with_layers(critique.layers);
                state.advance(critique.fixes, layout);
            }
            (None, error) => {
                let message = error.map(|e| e.to_string()).unwrap_or_default();
                events.push(LoopEvent::fallback(iteration, CRITIQUE, &message));
                let layout = state.layout.clone();
                state.advance(CRITIQUE_FAILURE_FEEDBACK.to_string(), layout);
            }
        }
    }
}
