//! Offline LLM backend.
//!
//! Answers every extraction request with the same fixed record, so the whole
//! pipeline can run without a language model.

use async_trait::async_trait;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

const PLACEHOLDER_RESPONSE: &str = r#"{
  "setting": "placeholder",
  "mood": "mysterious",
  "characters": ["placeholder"],
  "objects": ["placeholder"],
  "objective": "explore"
}"#;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderLlm;

#[async_trait]
impl LlmPort for PlaceholderLlm {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        tracing::debug!(
            messages = request.messages.len(),
            "Placeholder LLM answering with fixed attributes"
        );
        Ok(LlmResponse::text(PLACEHOLDER_RESPONSE))
    }
}
