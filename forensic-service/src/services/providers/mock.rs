//! Mock provider for tests.

use super::{AnalysisInput, AnalysisProvider, FinishReason, ProviderError, ProviderResponse};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Model text, returned verbatim.
    Text(String),
    /// A response with no text content.
    Empty,
    /// Model text cut off at the output token limit.
    Truncated(String),
    /// An upstream API failure with this message.
    ApiError(String),
}

/// Mock analysis provider that records the last request it saw.
pub struct MockAnalysisProvider {
    reply: MockReply,
    last_request: Mutex<Option<RecordedRequest>>,
}

/// Owned copy of an [`AnalysisInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub audio: Vec<u8>,
    pub mime_type: String,
    pub prompt: String,
}

impl MockAnalysisProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            last_request: Mutex::new(None),
        }
    }

    /// Mock that answers with the given JSON value.
    pub fn with_json(value: serde_json::Value) -> Self {
        Self::new(MockReply::Text(value.to_string()))
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn analyze(&self, input: AnalysisInput<'_>) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(RecordedRequest {
                audio: input.audio.to_vec(),
                mime_type: input.mime_type.to_string(),
                prompt: input.prompt.to_string(),
            });
        }

        let (text, finish_reason) = match &self.reply {
            MockReply::Text(text) => (Some(text.clone()), FinishReason::Complete),
            MockReply::Empty => (None, FinishReason::Complete),
            MockReply::Truncated(text) => (Some(text.clone()), FinishReason::Length),
            MockReply::ApiError(msg) => return Err(ProviderError::ApiError(msg.clone())),
        };

        Ok(ProviderResponse {
            text,
            input_tokens: i32::try_from(input.audio.len() / 4).unwrap_or(i32::MAX),
            output_tokens: 10,
            finish_reason,
        })
    }
}
