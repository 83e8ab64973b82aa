//! Collaborators used once per session, before refinement starts.

use crate::error::Result;
use crate::image::ImageBase64;
use crate::layout::{Layer, Layout};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Historical ad data for a company.
#[async_trait]
pub trait AdExampleSource: Send + Sync {
    /// Descriptions of a sample of the company's best-performing ads.
    async fn top_ad_descriptions(&self, company_id: i64) -> Result<Vec<String>>;

    /// Display name of the company, if known.
    async fn company_name(&self, company_id: i64) -> Result<Option<String>>;
}

/// First draft of a new ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdConcept {
    /// Scene behind the layers; must not contain any text.
    pub background_description: String,
    /// Description of the whole ad, background and layers together.
    pub full_ad_description: String,
    pub layers: Vec<Layer>,
}

impl AdConcept {
    pub fn layout(&self) -> Layout {
        Layout::new(self.layers.clone())
    }
}

/// Drafts an [`AdConcept`] from example ads. Must cope with zero examples.
#[async_trait]
pub trait AdConceptGenerator: Send + Sync {
    async fn generate(&self, company_name: Option<&str>, examples: &[String]) -> Result<AdConcept>;
}

/// Text-to-image service.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ImageBase64>;
}
