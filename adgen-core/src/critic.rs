//! Vision critique and layer revision seams.

use crate::error::Result;
use crate::history::FeedbackHistory;
use crate::image::ImageBase64;
use crate::layout::{Layer, Layout};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Feedback substituted when the critic cannot be reached or answers with
/// something unparseable.
pub const CRITIQUE_FAILURE_FEEDBACK: &str = "Error: Failed to get feedback from LLM.";

/// Binary acceptance signal plus free-text critique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_positive: bool,
    pub feedback_text: String,
}

impl Verdict {
    pub fn positive(feedback: impl Into<String>) -> Self {
        Self { is_positive: true, feedback_text: feedback.into() }
    }

    pub fn negative(feedback: impl Into<String>) -> Self {
        Self { is_positive: false, feedback_text: feedback.into() }
    }

    /// Conservative verdict used in place of a failed critique.
    pub fn failure() -> Self {
        Self::negative(CRITIQUE_FAILURE_FEEDBACK)
    }
}

/// Problems found in the current ad plus the revised layers fixing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Critique {
    pub fixes: String,
    pub layers: Vec<Layer>,
}

/// Everything a critic may look at for one iteration.
#[derive(Debug, Clone, Copy)]
pub struct CritiqueRequest<'a> {
    pub iteration: usize,
    pub layout: &'a Layout,
    pub rendered: &'a ImageBase64,
    pub background: &'a ImageBase64,
    /// Reference ad to converge towards, when comparing.
    pub target: Option<&'a ImageBase64>,
    pub history: &'a FeedbackHistory,
}

/// Input to a revision: the critique request plus the feedback to act on.
#[derive(Debug, Clone, Copy)]
pub struct RevisionRequest<'a> {
    pub iteration: usize,
    pub layout: &'a Layout,
    pub rendered: &'a ImageBase64,
    pub background: &'a ImageBase64,
    pub target: Option<&'a ImageBase64>,
    pub feedback: &'a str,
    pub history: &'a FeedbackHistory,
}

/// Vision model inspecting a rendered ad.
#[async_trait]
pub trait VisionCritic: Send + Sync {
    /// Judge the rendered ad.
    async fn verdict(&self, request: &CritiqueRequest<'_>) -> Result<Verdict>;

    /// Critique the rendered ad and return improved layers in one call.
    async fn critique_and_revise(&self, request: &CritiqueRequest<'_>) -> Result<Critique>;
}

/// Vision model producing a new layer list from feedback.
#[async_trait]
pub trait LayerReviser: Send + Sync {
    async fn revise(&self, request: &RevisionRequest<'_>) -> Result<Layout>;
}
