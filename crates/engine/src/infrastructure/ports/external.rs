//! External service port traits (LLM, status surface).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::LlmError;

// =============================================================================
// LLM Types
// =============================================================================

/// LLM request/response types
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    /// The conversation history
    pub messages: Vec<ChatMessage>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
    /// Finish reason
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Option<TokenUsage>,
}

impl LlmResponse {
    /// A plain completed response, as returned by offline backends and mocks.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: FinishReason::Stop,
            usage: None,
        }
    }
}

/// Reason the generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    #[serde(other)]
    Unknown,
}

/// Token usage information
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Status Surface
// =============================================================================

/// Status reported to the display surface at pipeline transition points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStatus {
    /// A request started.
    Processing,
    /// The plan was composed and applied without any failure.
    Success,
    /// A required collaborator is not wired.
    ComponentUnavailable(&'static str),
    /// The LLM backend or the renderer failed.
    BackendFailure(String),
}

impl PipelineStatus {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            PipelineStatus::ComponentUnavailable(_) | PipelineStatus::BackendFailure(_)
        )
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStatus::Processing => write!(f, "processing"),
            PipelineStatus::Success => write!(f, "success"),
            PipelineStatus::ComponentUnavailable(component) => {
                write!(f, "error: {} unavailable", component)
            }
            PipelineStatus::BackendFailure(message) => write!(f, "error: {}", message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait StatusPort: Send + Sync {
    fn report(&self, status: PipelineStatus);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_display_contract() {
        assert_eq!(PipelineStatus::Processing.to_string(), "processing");
        assert_eq!(PipelineStatus::Success.to_string(), "success");
        assert_eq!(
            PipelineStatus::ComponentUnavailable("world").to_string(),
            "error: world unavailable"
        );
        assert_eq!(
            PipelineStatus::BackendFailure("LLM request failed: timeout".into()).to_string(),
            "error: LLM request failed: timeout"
        );
    }

    #[test]
    fn only_failures_are_errors() {
        assert!(!PipelineStatus::Processing.is_error());
        assert!(!PipelineStatus::Success.is_error());
        assert!(PipelineStatus::ComponentUnavailable("catalog").is_error());
        assert!(PipelineStatus::BackendFailure("x".into()).is_error());
    }
}
