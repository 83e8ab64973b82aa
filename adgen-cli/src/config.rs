//! Environment configuration for the `adgen` binary.

use adgen_data::SupabaseConfig;
use adgen_model::{ImageConfig, OpenAIConfig};
use adgen_model::openai::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
use adgen_notify::SlackConfig;
use adgen_render::{AdMetadata, RenderApiConfig};
use adgen_telemetry::TelemetryConfig;
use std::collections::HashMap;
use std::env;

/// Upper bound for `--max-iterations`.
pub const MAX_ITERATIONS_LIMIT: usize = 100;

/// Upper bound for `--history`; one entry is recorded per iteration.
pub const MAX_HISTORY_LIMIT: usize = MAX_ITERATIONS_LIMIT;

/// Validation error with context and suggestions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}{}", suggestion_suffix(.suggestion))]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
    /// Suggested fix or valid values
    pub suggestion: Option<String>,
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion.as_ref().map(|s| format!(". {s}")).unwrap_or_default()
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into(), suggestion: None }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAISettings {
    pub api_key: String,
    pub chat_model: String,
    pub image_model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub url: String,
    pub token: String,
    pub brand_id: Option<String>,
    pub pool_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackSettings {
    pub bot_token: String,
    pub channel_id: String,
}

/// Everything the binary reads from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdGenConfig {
    pub openai: OpenAISettings,
    pub render: RenderSettings,
    /// Without it sessions run with zero examples.
    pub supabase: Option<SupabaseSettings>,
    /// Without it notifications are disabled.
    pub slack: Option<SlackSettings>,
    pub http_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl AdGenConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Environment Variables
    ///
    /// - `OPENAI_API_KEY` - required
    /// - `ADGEN_CHAT_MODEL` - chat/vision model (default: gpt-4.1)
    /// - `ADGEN_IMAGE_MODEL` - image model (default: gpt-image-1)
    /// - `OPENAI_BASE_URL` - OpenAI-compatible endpoint
    /// - `RENDER_API_URL`, `RENDER_API_TOKEN` - required
    /// - `RENDER_BRAND_ID`, `RENDER_POOL_ID` - ad metadata
    /// - `SUPABASE_URL`, `SUPABASE_ANON_KEY` - example ads
    /// - `SLACK_BOT_TOKEN`, `SLACK_CHANNEL_ID` - notifications
    /// - `ADGEN_HTTP_TIMEOUT_SECS` - per-request timeout
    /// - `ADGEN_LOG_LEVEL` - log filter (default: info)
    /// - `ADGEN_OTLP_ENDPOINT` - OTLP trace export
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ValidationError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str, field: &str| {
            get(key).ok_or_else(|| {
                ValidationError::new(field, format!("{key} is not set"))
                    .with_suggestion(format!("Add {key}=... to your environment or .env file"))
            })
        };

        let openai = OpenAISettings {
            api_key: required("OPENAI_API_KEY", "openai.api_key")?,
            chat_model: get("ADGEN_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            image_model: get("ADGEN_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            base_url: get("OPENAI_BASE_URL"),
        };

        let render = RenderSettings {
            url: required("RENDER_API_URL", "render.url")?,
            token: required("RENDER_API_TOKEN", "render.token")?,
            brand_id: get("RENDER_BRAND_ID"),
            pool_id: get("RENDER_POOL_ID"),
        };

        let supabase = match (get("SUPABASE_URL"), get("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(SupabaseSettings { url, anon_key }),
            (None, None) => None,
            _ => {
                return Err(ValidationError::new(
                    "supabase",
                    "SUPABASE_URL and SUPABASE_ANON_KEY must be set together",
                )
                .with_suggestion("Set both to load example ads, or neither to run without"));
            }
        };

        let slack = match (get("SLACK_BOT_TOKEN"), get("SLACK_CHANNEL_ID")) {
            (Some(bot_token), Some(channel_id)) => Some(SlackSettings { bot_token, channel_id }),
            (None, None) => None,
            _ => {
                return Err(ValidationError::new(
                    "slack",
                    "SLACK_BOT_TOKEN and SLACK_CHANNEL_ID must be set together",
                )
                .with_suggestion("Set both to enable notifications, or neither to disable them"));
            }
        };

        let http_timeout_secs = match get("ADGEN_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(raw.parse().map_err(|e| {
                ValidationError::new(
                    "http_timeout_secs",
                    format!("Invalid ADGEN_HTTP_TIMEOUT_SECS '{raw}': {e}"),
                )
                .with_suggestion("Use a positive integer like 60 or 120")
            })?),
            None => None,
        };

        let config = Self {
            openai,
            render,
            supabase,
            slack,
            http_timeout_secs,
            log_level: get("ADGEN_LOG_LEVEL"),
            otlp_endpoint: get("ADGEN_OTLP_ENDPOINT"),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.openai.api_key.is_empty() {
            return Err(ValidationError::new("openai.api_key", "API key cannot be empty")
                .with_suggestion("Set OPENAI_API_KEY"));
        }

        for (field, url) in [
            ("render.url", Some(&self.render.url)),
            ("openai.base_url", self.openai.base_url.as_ref()),
            ("supabase.url", self.supabase.as_ref().map(|s| &s.url)),
            ("otlp_endpoint", self.otlp_endpoint.as_ref()),
        ] {
            let Some(url) = url else {
                continue;
            };
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ValidationError::new(field, format!("'{url}' is not an HTTP URL"))
                    .with_suggestion("Use a full URL starting with http:// or https://"));
            }
        }

        if self.http_timeout_secs == Some(0) {
            return Err(ValidationError::new(
                "http_timeout_secs",
                "Timeout must be greater than 0",
            )
            .with_suggestion("Unset ADGEN_HTTP_TIMEOUT_SECS to rely on the transport default"));
        }

        Ok(())
    }

    pub fn chat_config(&self) -> OpenAIConfig {
        let mut config = OpenAIConfig::new(&self.openai.api_key, &self.openai.chat_model);
        if let Some(base_url) = &self.openai.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.http_timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        config
    }

    pub fn image_config(&self) -> ImageConfig {
        let mut config = ImageConfig::new(&self.openai.api_key).with_model(&self.openai.image_model);
        if let Some(base_url) = &self.openai.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.http_timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        config
    }

    pub fn render_config(&self) -> RenderApiConfig {
        let ad = AdMetadata::default().with_brand(
            self.render.brand_id.clone().unwrap_or_default(),
            self.render.pool_id.clone().unwrap_or_default(),
        );
        let mut config = RenderApiConfig::new(&self.render.url, &self.render.token).with_ad(ad);
        if let Some(secs) = self.http_timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        config
    }

    pub fn supabase_config(&self) -> Option<SupabaseConfig> {
        self.supabase.as_ref().map(|settings| {
            let config = SupabaseConfig::new(&settings.url, &settings.anon_key);
            match self.http_timeout_secs {
                Some(secs) => config.with_timeout_secs(secs),
                None => config,
            }
        })
    }

    pub fn slack_config(&self) -> Option<SlackConfig> {
        self.slack.as_ref().map(|settings| {
            let config = SlackConfig::new(&settings.bot_token, &settings.channel_id);
            match self.http_timeout_secs {
                Some(secs) => config.with_timeout_secs(secs),
                None => config,
            }
        })
    }

    pub fn telemetry_config(&self, log_level: Option<&str>, json: bool) -> TelemetryConfig {
        let mut config = TelemetryConfig::new("adgen").with_json(json);
        if let Some(level) = log_level.or(self.log_level.as_deref()) {
            config = config.with_log_filter(level);
        }
        if let Some(endpoint) = &self.otlp_endpoint {
            config = config.with_otlp_endpoint(endpoint);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("OPENAI_API_KEY", "sk-test"),
            ("RENDER_API_URL", "https://render.example.com/api/ads"),
            ("RENDER_API_TOKEN", "tok"),
        ]
    }

    fn with(extra: &[(&'static str, &'static str)]) -> HashMap<String, String> {
        let mut pairs = minimal();
        pairs.extend_from_slice(extra);
        vars(&pairs)
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AdGenConfig::from_vars(&with(&[])).unwrap();
        assert_eq!(config.openai.chat_model, "gpt-4.1");
        assert_eq!(config.openai.image_model, "gpt-image-1");
        assert!(config.supabase.is_none());
        assert!(config.slack.is_none());
        assert!(config.http_timeout_secs.is_none());
    }

    #[test]
    fn test_missing_api_key() {
        let env = vars(&[("RENDER_API_URL", "https://r"), ("RENDER_API_TOKEN", "t")]);
        let err = AdGenConfig::from_vars(&env).unwrap_err();
        assert_eq!(err.field, "openai.api_key");
        assert!(err.to_string().starts_with("openai.api_key: OPENAI_API_KEY is not set"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let err = AdGenConfig::from_vars(&with(&[("OPENAI_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err.field, "openai.api_key");
    }

    #[test]
    fn test_half_configured_supabase_is_rejected() {
        let err = AdGenConfig::from_vars(&with(&[("SUPABASE_URL", "https://db.supabase.co")]))
            .unwrap_err();
        assert_eq!(err.field, "supabase");
    }

    #[test]
    fn test_half_configured_slack_is_rejected() {
        let err = AdGenConfig::from_vars(&with(&[("SLACK_CHANNEL_ID", "C1")])).unwrap_err();
        assert_eq!(err.field, "slack");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = AdGenConfig::from_vars(&with(&[("ADGEN_HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err.field, "http_timeout_secs");

        let err = AdGenConfig::from_vars(&with(&[("ADGEN_HTTP_TIMEOUT_SECS", "0")])).unwrap_err();
        assert_eq!(err.field, "http_timeout_secs");
    }

    #[test]
    fn test_render_url_must_be_http() {
        let err = AdGenConfig::from_vars(&with(&[("RENDER_API_URL", "render.example.com")]))
            .unwrap_err();
        assert_eq!(err.field, "render.url");
    }

    #[test]
    fn test_adapter_configs_carry_timeout_and_brand() {
        let config = AdGenConfig::from_vars(&with(&[
            ("ADGEN_HTTP_TIMEOUT_SECS", "30"),
            ("RENDER_BRAND_ID", "brand-1"),
            ("RENDER_POOL_ID", "pool-9"),
            ("SUPABASE_URL", "https://db.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("SLACK_BOT_TOKEN", "xoxb"),
            ("SLACK_CHANNEL_ID", "C1"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
        ]))
        .unwrap();

        let render = config.render_config();
        assert_eq!(render.ad.brand_id, "brand-1");
        assert_eq!(render.ad.pool_id, "pool-9");
        assert_eq!(render.timeout_secs, Some(30));

        assert_eq!(config.chat_config().effective_base_url(), "http://localhost:8080/v1");
        assert_eq!(config.chat_config().model, "gpt-4.1");
        assert_eq!(config.image_config().model, "gpt-image-1");
        assert_eq!(config.supabase_config().unwrap().timeout_secs, Some(30));
        assert_eq!(config.slack_config().unwrap().channel_id, "C1");
    }

    #[test]
    fn test_cli_log_level_wins() {
        let config = AdGenConfig::from_vars(&with(&[("ADGEN_LOG_LEVEL", "warn")])).unwrap();
        assert_eq!(config.telemetry_config(None, false).log_filter.as_deref(), Some("warn"));
        assert_eq!(
            config.telemetry_config(Some("debug"), true).log_filter.as_deref(),
            Some("debug")
        );
    }
}
