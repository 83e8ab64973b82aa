//! Loop configuration.

use adgen_core::{FeedbackHistory, ImageBase64};

/// Iteration cap of the single-critic presets.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;
/// Iteration cap of the conversational preset.
pub const CONVERSATIONAL_MAX_ITERATIONS: usize = 5;
/// Entries kept by [`HistoryRetention::full`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 16;

/// How the critic is consulted each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CriticMode {
    /// Accept/reject verdict; a rejection is handed to the reviser.
    #[default]
    Binary,
    /// One call that critiques and returns the revised layers.
    DirectRevise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryRetention {
    #[default]
    None,
    /// Keep the latest `capacity` critiques.
    Full { capacity: usize },
}

impl HistoryRetention {
    pub fn full() -> Self {
        Self::Full { capacity: DEFAULT_HISTORY_CAPACITY }
    }

    pub fn new_history(&self) -> FeedbackHistory {
        match self {
            Self::None => FeedbackHistory::disabled(),
            Self::Full { capacity } => FeedbackHistory::new(*capacity),
        }
    }
}

/// Parameters of one [`RefinementLoop`](crate::RefinementLoop) run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopPolicy {
    pub critic_mode: CriticMode,
    pub history_retention: HistoryRetention,
    /// Reference ad the critic compares against.
    pub comparison_target: Option<ImageBase64>,
    pub max_iterations: usize,
    pub publish_on_completion: bool,
    /// Forward every render to the notifier.
    pub notify_renders: bool,
}

impl Default for LoopPolicy {
    fn default() -> Self {
        Self::binary_review()
    }
}

impl LoopPolicy {
    /// Verdict plus separate reviser, no memory.
    pub fn binary_review() -> Self {
        Self {
            critic_mode: CriticMode::Binary,
            history_retention: HistoryRetention::None,
            comparison_target: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            publish_on_completion: false,
            notify_renders: true,
        }
    }

    /// Direct revision steered towards a reference ad.
    pub fn target_match(target: ImageBase64) -> Self {
        Self {
            critic_mode: CriticMode::DirectRevise,
            comparison_target: Some(target),
            ..Self::binary_review()
        }
    }

    /// Direct revision with the whole critique conversation replayed, then
    /// published.
    pub fn conversational() -> Self {
        Self {
            critic_mode: CriticMode::DirectRevise,
            history_retention: HistoryRetention::full(),
            comparison_target: None,
            max_iterations: CONVERSATIONAL_MAX_ITERATIONS,
            publish_on_completion: true,
            notify_renders: true,
        }
    }

    pub fn with_critic_mode(mut self, mode: CriticMode) -> Self {
        self.critic_mode = mode;
        self
    }

    pub fn with_history(mut self, retention: HistoryRetention) -> Self {
        self.history_retention = retention;
        self
    }

    pub fn with_target(mut self, target: ImageBase64) -> Self {
        self.comparison_target = Some(target);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish_on_completion = publish;
        self
    }

    pub fn with_notify_renders(mut self, notify: bool) -> Self {
        self.notify_renders = notify;
        self
    }
}
