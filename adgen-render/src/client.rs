//! Rendering API client.
//!
//! One endpoint serves both purposes: `final: false` answers with the raw
//! flattened image, `final: true` stores the ad and answers with JSON.

use crate::config::{AdMetadata, RenderApiConfig};
use adgen_core::{
    AdGenError, ImageBase64, Layer, Layout, PublishResult, Publisher, RenderClient, Result,
};
use adgen_telemetry::{http_call_span, record_http_status};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::Instrument;

/// Request body of the rendering API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest<'a> {
    #[serde(rename = "final")]
    pub finalize: bool,
    pub ad: &'a AdMetadata,
    pub width: u32,
    pub height: u32,
    /// Background as a `data:image/png;base64,` URL.
    pub source_image: String,
    pub layers: &'a [Layer],
}

type ErrorFn = fn(Option<u16>, String) -> AdGenError;

/// [`RenderClient`] and [`Publisher`] over HTTP.
pub struct RenderApiClient {
    client: Client,
    config: RenderApiConfig,
}

impl RenderApiClient {
    pub fn new(config: RenderApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdGenError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RenderApiConfig {
        &self.config
    }

    pub fn request_body<'a>(
        &'a self,
        layout: &'a Layout,
        background: &ImageBase64,
        finalize: bool,
    ) -> RenderRequest<'a> {
        RenderRequest {
            finalize,
            ad: &self.config.ad,
            width: layout.width,
            height: layout.height,
            source_image: background.to_data_url(),
            layers: &layout.layers,
        }
    }

    /// POST the request; any transport failure or non-success status becomes
    /// an error built by `to_error`.
    async fn send(&self, body: &RenderRequest<'_>, to_error: ErrorFn) -> Result<Response> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_token)
            .json(body)
            .send()
            .await
            .map_err(|e| to_error(None, format!("request failed: {e}")))?;

        let status = response.status();
        record_http_status(status.as_u16());
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %error_text, "Render API rejected request");
            return Err(to_error(
                Some(status.as_u16()),
                format!("HTTP error! status: {}", status.as_u16()),
            ));
        }
        Ok(response)
    }

    async fn fetch_image(
        &self,
        layout: &Layout,
        background: &ImageBase64,
        to_error: ErrorFn,
    ) -> Result<ImageBase64> {
        let body = self.request_body(layout, background, false);
        let response = self.send(&body, to_error).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| to_error(None, format!("reading image failed: {e}")))?;
        if bytes.is_empty() {
            return Err(to_error(None, "response contained no image data".to_string()));
        }
        Ok(ImageBase64::from_bytes(&bytes))
    }

    async fn publish_final(&self, layout: &Layout, background: &ImageBase64) -> Result<PublishResult> {
        let to_error: ErrorFn = |s, m| AdGenError::publish(s, m);
        let body = self.request_body(layout, background, true);
        let response = self.send(&body, to_error).await?;
        let metadata: serde_json::Value = response
            .json()
            .await
            .map_err(|e| to_error(None, format!("malformed publish response: {e}")))?;
        tracing::info!(layers = layout.layers.len(), "Ad published");
        Ok(PublishResult::Published(metadata))
    }
}

#[async_trait]
impl RenderClient for RenderApiClient {
    async fn render(&self, layout: &Layout, background: &ImageBase64) -> Result<ImageBase64> {
        self.fetch_image(layout, background, |s, m| AdGenError::render(s, m))
            .instrument(http_call_span("render-api", "render"))
            .await
    }
}

#[async_trait]
impl Publisher for RenderApiClient {
    async fn publish(
        &self,
        layout: &Layout,
        background: &ImageBase64,
        finalize: bool,
    ) -> Result<PublishResult> {
        if finalize {
            self.publish_final(layout, background)
                .instrument(http_call_span("render-api", "publish"))
                .await
        } else {
            self.fetch_image(layout, background, |s, m| AdGenError::publish(s, m))
                .instrument(http_call_span("render-api", "preview"))
                .await
                .map(PublishResult::Preview)
        }
    }
}
