//! Rendering and publishing seams.
//!
//! Both talk to the same external endpoint; a render is a non-final publish
//! whose response is the flattened image.

use crate::error::Result;
use crate::image::ImageBase64;
use crate::layout::Layout;
use async_trait::async_trait;
use serde_json::Value;

/// Flattens a layout onto the background.
#[async_trait]
pub trait RenderClient: Send + Sync {
    async fn render(&self, layout: &Layout, background: &ImageBase64) -> Result<ImageBase64>;
}

/// What the publishing endpoint answered.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishResult {
    /// Non-final request: the rendered image.
    Preview(ImageBase64),
    /// Final request: metadata of the stored artifact.
    Published(Value),
}

impl PublishResult {
    pub fn preview(&self) -> Option<&ImageBase64> {
        match self {
            Self::Preview(image) => Some(image),
            Self::Published(_) => None,
        }
    }

    pub fn metadata(&self) -> Option<&Value> {
        match self {
            Self::Published(value) => Some(value),
            Self::Preview(_) => None,
        }
    }
}

/// Submits a layout and its background to the publishing endpoint.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        layout: &Layout,
        background: &ImageBase64,
        finalize: bool,
    ) -> Result<PublishResult>;
}
