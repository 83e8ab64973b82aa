use crate::chat::{ChatModel, ChatRequest};
use adgen_core::{AdGenError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Chat model answering from a script, recording every request it receives.
pub struct MockChatModel {
    name: String,
    responses: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.responses.get_mut().push_back(Ok(text.into()));
        self
    }

    pub fn with_json(self, value: Value) -> Self {
        self.with_response(value.to_string())
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.responses.get_mut().push_back(Err(AdGenError::Llm(message.into())));
        self
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.requests.lock().await.push(request);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AdGenError::Llm(format!("{}: script exhausted", self.name))))
    }
}
