//! # adgen-cli
//!
//! The `adgen` binary: reads configuration from the environment (and a
//! `.env` file), builds the OpenAI, rendering, Supabase and Slack adapters,
//! and runs one ad-generation session per invocation.
//!
//! ```bash
//! adgen run --company-id 42
//! adgen run --company-id 42 --mode target --target-image reference.png
//! adgen run --company-id 42 --mode conversational --max-iterations 3
//! adgen config
//! ```

pub mod app;
pub mod cli;
pub mod config;

pub use app::{SessionSummary, build_pipeline, run_session};
pub use cli::{Cli, CliMode, Commands, RunArgs};
pub use config::{AdGenConfig, MAX_HISTORY_LIMIT, MAX_ITERATIONS_LIMIT, ValidationError};
