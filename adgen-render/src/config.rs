//! Configuration for the rendering API.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ad metadata sent with every render and publish request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdMetadata {
    pub name: String,
    pub brand_id: String,
    pub pool_id: String,
    pub description: String,
    pub website_footer: String,
    pub title_footer: String,
    pub description_footer: String,
    pub tags: Vec<String>,
    pub cta_footer: String,
}

impl Default for AdMetadata {
    fn default() -> Self {
        Self {
            name: "adgen".to_string(),
            brand_id: String::new(),
            pool_id: String::new(),
            description: String::new(),
            website_footer: String::new(),
            title_footer: String::new(),
            description_footer: "This is the footer description".to_string(),
            tags: vec!["ai-generated".to_string()],
            cta_footer: "Learn More".to_string(),
        }
    }
}

impl AdMetadata {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_brand(mut self, brand_id: impl Into<String>, pool_id: impl Into<String>) -> Self {
        self.brand_id = brand_id.into();
        self.pool_id = pool_id.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderApiConfig {
    /// Full URL of the render/publish endpoint.
    pub endpoint: String,
    /// Bearer token.
    pub api_token: String,
    #[serde(default)]
    pub ad: AdMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl RenderApiConfig {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            ad: AdMetadata::default(),
            timeout_secs: None,
        }
    }

    pub fn with_ad(mut self, ad: AdMetadata) -> Self {
        self.ad = ad;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
