//! # adgen-model
//!
//! Chat and image model integrations for the adgen pipeline.
//!
//! ## Overview
//!
//! - [`ChatModel`] - minimal chat-completions abstraction with image inputs
//!   and JSON-schema constrained answers
//! - [`OpenAIChatClient`] / [`OpenAIImageGenerator`] - OpenAI-compatible HTTP clients
//! - [`MockChatModel`] - scripted model for tests
//! - [`LlmVisionCritic`], [`LlmLayerReviser`], [`LlmConceptGenerator`] - the
//!   `adgen-core` collaborator traits implemented on top of a [`ChatModel`]
//!
//! Model answers are parsed strictly (see [`structured`]): anything that is
//! not exactly the requested JSON document is an `AdGenError::Llm`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use adgen_model::{LlmVisionCritic, OpenAIChatClient, OpenAIConfig};
//! use std::sync::Arc;
//!
//! let api_key = std::env::var("OPENAI_API_KEY").unwrap();
//! let model = Arc::new(OpenAIChatClient::new(OpenAIConfig::gpt41(api_key)).unwrap());
//! let critic = LlmVisionCritic::new(model);
//! ```

pub mod chat;
pub mod concept;
mod context;
pub mod critic;
pub mod mock;
pub mod openai;
pub mod prompts;
pub mod reviser;
pub mod schema;
pub mod structured;

pub use chat::{ChatMessage, ChatModel, ChatRequest, ContentPart, ResponseSchema, Role};
pub use concept::LlmConceptGenerator;
pub use critic::LlmVisionCritic;
pub use mock::MockChatModel;
pub use openai::{ImageConfig, OpenAIChatClient, OpenAIConfig, OpenAIImageGenerator};
pub use reviser::LlmLayerReviser;
