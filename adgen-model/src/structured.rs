//! Strict parsing of structured model output.
//!
//! The answer must be exactly one JSON document matching the requested
//! schema. Nothing is repaired: markdown fences, trailing prose, unknown
//! fields and invalid colors are all rejected as [`AdGenError::Llm`].

use adgen_core::{AdGenError, Layer, Layout, Result, Verdict};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Parse `raw` as `T`, failing closed.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| AdGenError::Llm(format!("structured output rejected: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct VerdictPayload {
    feedback_is_positive: bool,
    ad_feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayersPayload {
    layers: Vec<Layer>,
}

/// Parse a `{feedbackIsPositive, adFeedback}` answer.
pub fn parse_verdict(raw: &str) -> Result<Verdict> {
    let payload: VerdictPayload = parse_structured(raw)?;
    Ok(Verdict { is_positive: payload.feedback_is_positive, feedback_text: payload.ad_feedback })
}

/// Parse a `{layers}` answer onto the canvas of `current`.
pub fn parse_layers(raw: &str, current: &Layout) -> Result<Layout> {
    let payload: LayersPayload = parse_structured(raw)?;
    Ok(current.with_layers(payload.layers))
}
