//! Message assembly shared by the critic and the reviser.

use crate::chat::ChatMessage;
use crate::prompts;
use adgen_core::{FeedbackHistory, ImageBase64, Layout, Result};
use serde_json::json;

pub(crate) fn layers_text(layout: &Layout) -> Result<String> {
    Ok(format!("Here are the current layers:\n\n{}", layout.layers_json()?))
}

/// Append the rendered ad, the background and, when comparing, the target.
pub(crate) fn with_images(
    message: ChatMessage,
    rendered: &ImageBase64,
    background: &ImageBase64,
    target: Option<&ImageBase64>,
) -> ChatMessage {
    let message = message
        .with_text(prompts::CURRENT_AD)
        .with_image(rendered.clone())
        .with_text(prompts::BACKGROUND)
        .with_image(background.clone());
    match target {
        Some(target) => message.with_text(prompts::TARGET).with_image(target.clone()),
        None => message,
    }
}

/// Replay retained critiques as a prior conversation. Images of earlier
/// iterations are not resent.
pub(crate) fn replay(history: &FeedbackHistory) -> Result<Vec<ChatMessage>> {
    let mut messages = Vec::with_capacity(history.len() * 2);
    for entry in history.iter() {
        messages.push(ChatMessage::user().with_text(format!(
            "Iteration #{}: analyze the ad and improve its layers.",
            entry.iteration
        )));
        let answer = json!({"fixes": entry.critique, "layers": entry.layout.layers});
        messages.push(ChatMessage::assistant(serde_json::to_string(&answer)?));
    }
    Ok(messages)
}

/// Earlier feedback as a bullet list, for prompts that do not replay turns.
pub(crate) fn feedback_digest(history: &FeedbackHistory) -> Option<String> {
    if history.is_empty() {
        return None;
    }
    let lines: Vec<String> = history
        .iter()
        .map(|entry| format!("- Iteration #{}: {}", entry.iteration, entry.critique))
        .collect();
    Some(format!("Feedback from earlier iterations:\n{}", lines.join("\n")))
}
