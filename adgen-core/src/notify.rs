//! Best-effort side channel for generated images.

use crate::error::Result;
use crate::image::ImageBase64;
use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, image: &ImageBase64, caption: &str) -> Result<()>;
}

/// Send `image` if a notifier is configured. Failures are logged and dropped.
pub async fn notify_best_effort(notifier: Option<&dyn Notifier>, image: &ImageBase64, caption: &str) {
    let Some(notifier) = notifier else {
        return;
    };
    if let Err(e) = notifier.notify(image, caption).await {
        tracing::warn!(error = %e, caption, "Notification failed; continuing");
    }
}
