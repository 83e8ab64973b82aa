//! # adgen-core
//!
//! Core types and collaborator traits for the adgen ad-creative pipeline.
//!
//! ## Overview
//!
//! - [`Layout`] / [`Layer`] - the structured ad: a 1024x1024 canvas and its
//!   text, icon and rectangle layers in paint order
//! - [`ImageBase64`] - background, rendered and reference images
//! - [`Verdict`] / [`Critique`] - what the vision critic answers
//! - [`FeedbackHistory`] - bounded record of past critiques
//! - [`RenderClient`], [`Publisher`], [`VisionCritic`], [`LayerReviser`],
//!   [`AdExampleSource`], [`AdConceptGenerator`], [`ImageGenerator`],
//!   [`Notifier`] - the seams the refinement loop and pipeline drive
//! - [`AdGenError`] / [`Result`] - unified error handling
//!
//! ## Example
//!
//! ```rust
//! use adgen_core::{HexColor, Layer, Layout, TextAlign, TextLayer};
//!
//! let layout = Layout::new(vec![Layer::Text(TextLayer {
//!     text: "Summer Sale".into(),
//!     x: 112,
//!     y: 96,
//!     width: 800,
//!     height: 120,
//!     font_size: 72,
//!     color: HexColor::parse("#ffffff").unwrap(),
//!     align: TextAlign::Center,
//! })]);
//! assert_eq!(layout.width, 1024);
//! ```

pub mod critic;
pub mod error;
pub mod history;
pub mod image;
pub mod layout;
pub mod notify;
pub mod render;
pub mod setup;

pub use critic::{
    CRITIQUE_FAILURE_FEEDBACK, Critique, CritiqueRequest, LayerReviser, RevisionRequest, Verdict,
    VisionCritic,
};
pub use error::{AdGenError, Result};
pub use history::{FeedbackEntry, FeedbackHistory};
pub use image::ImageBase64;
pub use layout::{CANVAS_SIZE, HexColor, IconLayer, Layer, Layout, RectLayer, TextAlign, TextLayer};
pub use notify::{Notifier, notify_best_effort};
pub use render::{PublishResult, Publisher, RenderClient};
pub use setup::{AdConcept, AdConceptGenerator, AdExampleSource, ImageGenerator};
