//! # adgen-graph
//!
//! The iterative refinement workflow at the heart of adgen, plus the
//! session pipeline that feeds it.
//!
//! ## Overview
//!
//! - [`RefinementLoop`] - render, critique and revise a layout until the
//!   critic approves or the iteration cap is reached
//! - [`LoopPolicy`] - critic mode, history retention, comparison target,
//!   cap and publication, with presets for the common setups
//! - [`RefinementState`] - what one run carries between iterations
//! - [`LoopEvent`] - record of what each run did, including fallbacks
//! - [`AdPipeline`] - example retrieval, concept and background generation,
//!   then refinement
//!
//! ## Example
//!
//! ```rust,ignore
//! use adgen_graph::{LoopPolicy, RefinementLoop};
//!
//! let refinement = RefinementLoop::new(renderer, critic, reviser, LoopPolicy::conversational())
//!     .with_publisher(publisher);
//! let outcome = refinement.run(layout, background).await?;
//! println!("{} iterations, stopped: {:?}", outcome.iterations, outcome.stop_reason);
//! ```

pub mod events;
pub mod pipeline;
pub mod policy;
pub mod refinement;
pub mod stages;
pub mod state;

pub use events::{LoopEvent, StopReason};
pub use pipeline::{
    AdPipeline, BACKGROUND_PROMPT_SUFFIX, SessionOutcome, background_prompt, full_ad_prompt,
};
pub use policy::{
    CONVERSATIONAL_MAX_ITERATIONS, CriticMode, DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_ITERATIONS,
    HistoryRetention, LoopPolicy,
};
pub use refinement::{RefinementLoop, RefinementOutcome};
pub use state::{INITIAL_FEEDBACK, RefinementState};
