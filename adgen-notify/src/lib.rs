//! # adgen-notify
//!
//! Posts generated images to a Slack channel. Used as the pipeline's
//! best-effort [`Notifier`](adgen_core::Notifier): callers log failures and
//! carry on.

pub mod config;
pub mod slack;

pub use config::{SLACK_API_BASE, SlackConfig};
pub use slack::SlackNotifier;
