//! Events recorded while a refinement loop runs.

use serde::Serialize;
use serde_json::Value;

/// Why a loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The iteration cap was reached.
    MaxIterations,
    /// The critic accepted the ad.
    Approved,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoopEvent {
    /// The current layout was rendered.
    Rendered { iteration: usize },

    /// Binary critic answered (or was substituted).
    Verdict { iteration: usize, is_positive: bool, feedback: String },

    /// Direct-revise critic answered.
    Critiqued { iteration: usize, fixes: String, layer_count: usize },

    /// The reviser produced a new layout.
    Revised { iteration: usize, layer_count: usize },

    /// A stage failed and its fallback was used.
    Fallback { iteration: usize, stage: String, error: String },

    /// Final layout submitted.
    Published { metadata: Option<Value> },

    /// Loop finished.
    Done { iterations: usize, reason: StopReason },
}

impl LoopEvent {
    pub fn rendered(iteration: usize) -> Self {
        Self::Rendered { iteration }
    }

    pub fn verdict(iteration: usize, is_positive: bool, feedback: &str) -> Self {
        Self::Verdict { iteration, is_positive, feedback: feedback.to_string() }
    }

    pub fn critiqued(iteration: usize, fixes: &str, layer_count: usize) -> Self {
        Self::Critiqued { iteration, fixes: fixes.to_string(), layer_count }
    }

    pub fn revised(iteration: usize, layer_count: usize) -> Self {
        Self::Revised { iteration, layer_count }
    }

    pub fn fallback(iteration: usize, stage: &str, error: &str) -> Self {
        Self::Fallback { iteration, stage: stage.to_string(), error: error.to_string() }
    }

    pub fn published(metadata: Option<Value>) -> Self {
        Self::Published { metadata }
    }

    pub fn done(iterations: usize, reason: StopReason) -> Self {
        Self::Done { iterations, reason }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}
