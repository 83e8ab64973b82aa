//! Base64 image payloads exchanged with the rendering API, the image
//! generator, the vision models and the notification channel.

use crate::error::{AdGenError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Canonical (no `data:` prefix) base64-encoded raster image.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageBase64(String);

impl ImageBase64 {
    /// Wrap base64 text. A `data:image/...;base64,` prefix is stripped.
    pub fn new(encoded: impl Into<String>) -> Self {
        let encoded = encoded.into();
        match strip_data_url(&encoded) {
            Some(payload) => Self(payload.to_string()),
            None => Self(encoded),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode to raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.0.as_bytes())
            .map_err(|e| AdGenError::InvalidImage(format!("not valid base64: {e}")))
    }

    /// `data:image/png;base64,<payload>` form used by the rendering API and
    /// vision model requests.
    pub fn to_data_url(&self) -> String {
        format!("{PNG_DATA_URL_PREFIX}{}", self.0)
    }
}

fn strip_data_url(value: &str) -> Option<&str> {
    let rest = value.strip_prefix("data:image/")?;
    let (_, payload) = rest.split_once(";base64,")?;
    Some(payload)
}

// Payloads are megabytes of base64; keep logs readable.
impl fmt::Debug for ImageBase64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBase64").field("len", &self.0.len()).finish()
    }
}
