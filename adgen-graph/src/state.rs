//! Per-run refinement state.

use crate::policy::LoopPolicy;
use adgen_core::{
    CritiqueRequest, FeedbackEntry, FeedbackHistory, ImageBase64, Layout, RevisionRequest,
};

/// Feedback shown alongside the first render.
pub const INITIAL_FEEDBACK: &str = "This is the initial ad:";

/// Owned by one loop run; created at entry and dropped at exit.
#[derive(Debug, Clone)]
pub struct RefinementState {
    pub layout: Layout,
    /// Latest render of `layout`. Empty until the first render.
    pub rendered: ImageBase64,
    pub background: ImageBase64,
    pub iteration: usize,
    pub history: FeedbackHistory,
    pub target: Option<ImageBase64>,
    /// Critique that produced the current layout.
    pub latest_feedback: String,
}

impl RefinementState {
    pub fn new(layout: Layout, background: ImageBase64, policy: &LoopPolicy) -> Self {
        Self {
            layout,
            rendered: ImageBase64::new(String::new()),
            background,
            iteration: 0,
            history: policy.history_retention.new_history(),
            target: policy.comparison_target.clone(),
            latest_feedback: INITIAL_FEEDBACK.to_string(),
        }
    }

    pub fn critique_request(&self) -> CritiqueRequest<'_> {
        CritiqueRequest {
            iteration: self.iteration,
            layout: &self.layout,
            rendered: &self.rendered,
            background: &self.background,
            target: self.target.as_ref(),
            history: &self.history,
        }
    }

    pub fn revision_request<'a>(&'a self, feedback: &'a str) -> RevisionRequest<'a> {
        RevisionRequest {
            iteration: self.iteration,
            layout: &self.layout,
            rendered: &self.rendered,
            background: &self.background,
            target: self.target.as_ref(),
            feedback,
            history: &self.history,
        }
    }

    /// Close the current iteration: record the critique, adopt `layout` and
    /// move to the next iteration.
    pub fn advance(&mut self, feedback: String, layout: Layout) {
        self.history.push(FeedbackEntry {
            iteration: self.iteration,
            critique: feedback.clone(),
            layout: layout.clone(),
        });
        self.latest_feedback = feedback;
        self.layout = layout;
        self.iteration += 1;
    }

    /// Caption sent with the current render.
    pub fn caption(&self) -> String {
        format!("ITERATION #{}\n{}", self.iteration, self.latest_feedback)
    }
}
