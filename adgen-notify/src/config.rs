use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Slack Web API base URL.
pub const SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`) with `files:write`.
    pub bot_token: String,
    pub channel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_filename() -> String {
    "generated-image.png".to_string()
}

fn default_title() -> String {
    "Generated Image".to_string()
}

impl SlackConfig {
    pub fn new(bot_token: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            channel_id: channel_id.into(),
            api_base: None,
            filename: default_filename(),
            title: default_title(),
            timeout_secs: None,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn effective_api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(SLACK_API_BASE).trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
