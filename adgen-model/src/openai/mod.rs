//! OpenAI-compatible provider.
//!
//! Chat completions with image inputs and strict JSON-schema answers, plus
//! `/images/generations` for backgrounds and previews.

mod client;
mod config;
pub(crate) mod convert;

pub use client::{OpenAIChatClient, OpenAIImageGenerator};
pub use config::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, ImageConfig, OPENAI_API_BASE, OpenAIConfig};
