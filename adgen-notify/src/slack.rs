//! Slack external file upload.
//!
//! Three calls: reserve an upload URL, send the raw bytes there, then
//! complete the upload into the channel with the caption as comment.

use crate::config::SlackConfig;
use adgen_core::{AdGenError, ImageBase64, Notifier, Result};
use adgen_telemetry::{http_call_span, record_http_status};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

#[derive(Debug, Deserialize)]
struct UploadUrlResponse {
    ok: bool,
    #[serde(default)]
    upload_url: Option<String>,
    #[serde(default)]
    file_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CompletedFile<'a> {
    id: &'a str,
    title: &'a str,
}

fn slack_error(step: &str, error: Option<String>) -> AdGenError {
    AdGenError::Notification(format!(
        "Slack API error in {step}: {}",
        error.unwrap_or_else(|| "unknown error".to_string())
    ))
}

pub struct SlackNotifier {
    client: Client,
    config: SlackConfig,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdGenError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.config.effective_api_base())
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, form: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .bearer_auth(&self.config.bot_token)
            .form(form)
            .send()
            .await
            .map_err(|e| AdGenError::Notification(format!("{method} request failed: {e}")))?;
        record_http_status(response.status().as_u16());
        if !response.status().is_success() {
            return Err(AdGenError::Notification(format!(
                "{method} returned HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AdGenError::Notification(format!("{method} returned malformed JSON: {e}")))
    }

    async fn upload(&self, image: &ImageBase64, caption: &str) -> Result<()> {
        let bytes = image
            .decode()
            .map_err(|e| AdGenError::Notification(format!("cannot decode image: {e}")))?;
        tracing::debug!(
            filename = %self.config.filename,
            size = bytes.len(),
            "Uploading image to Slack"
        );

        let reserved: UploadUrlResponse = self
            .call(
                "files.getUploadURLExternal",
                &[("filename", self.config.filename.clone()), ("length", bytes.len().to_string())],
            )
            .await?;
        if !reserved.ok {
            return Err(slack_error("files.getUploadURLExternal", reserved.error));
        }
        let (Some(upload_url), Some(file_id)) = (reserved.upload_url, reserved.file_id) else {
            return Err(slack_error(
                "files.getUploadURLExternal",
                Some("missing upload_url or file_id".to_string()),
            ));
        };

        let uploaded = self
            .client
            .post(&upload_url)
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AdGenError::Notification(format!("file upload failed: {e}")))?;
        if !uploaded.status().is_success() {
            return Err(AdGenError::Notification(format!(
                "file upload returned HTTP {}",
                uploaded.status()
            )));
        }

        let files =
            serde_json::to_string(&[CompletedFile { id: &file_id, title: &self.config.title }])?;
        let completed: ApiResponse = self
            .call(
                "files.completeUploadExternal",
                &[
                    ("files", files),
                    ("channel_id", self.config.channel_id.clone()),
                    ("initial_comment", caption.to_string()),
                ],
            )
            .await?;
        if !completed.ok {
            return Err(slack_error("files.completeUploadExternal", completed.error));
        }

        tracing::info!(file_id = %file_id, channel = %self.config.channel_id, "Image posted to Slack");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, image: &ImageBase64, caption: &str) -> Result<()> {
        self.upload(image, caption).instrument(http_call_span("slack", "upload")).await
    }
}
