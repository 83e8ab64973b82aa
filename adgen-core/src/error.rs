/// Errors raised anywhere in the pipeline.
///
/// Only [`AdGenError::Render`] (and failures while setting a session up) are
/// allowed to end a refinement session. Model, notification and data-source
/// failures are degraded by the caller.
#[derive(Debug, thiserror::Error)]
pub enum AdGenError {
    #[error("Render error{}: {message}", status_suffix(.status))]
    Render { status: Option<u16>, message: String },

    #[error("Publish error{}: {message}", status_suffix(.status))]
    Publish { status: Option<u16>, message: String },

    #[error("LLM invocation error: {0}")]
    Llm(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Image generation error: {0}")]
    ImageGeneration(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {code})")).unwrap_or_default()
}

impl AdGenError {
    pub fn render(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Render { status, message: message.into() }
    }

    pub fn publish(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Publish { status, message: message.into() }
    }

    /// HTTP status carried by render/publish failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Render { status, .. } | Self::Publish { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error must end the current session.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Llm(_) | Self::Notification(_) | Self::DataSource(_))
    }
}

pub type Result<T> = std::result::Result<T, AdGenError>;
