//! Dream extraction prompt.
//!
//! The template is fixed and has exactly one slot, `{dream}`. Nothing else is
//! injected into the request, so the prompt contract can be tested without a
//! backend.

use crate::infrastructure::ports::{ChatMessage, LlmRequest};

/// Substitution slot for the raw dream text.
pub const DREAM_SLOT: &str = "{dream}";

pub const DREAM_EXTRACTION_TEMPLATE: &str = r#"Extract the following elements from this dream description:
- Setting: The main environment or location
- Mood: The emotional tone or atmosphere
- Characters: Any beings or entities present
- Objects: Important items or objects
- Objective: The main action or objective (e.g., chase, collect, explore)

Respond with a single JSON object and nothing else, using exactly these keys:
{"setting": "...", "mood": "...", "characters": ["..."], "objects": ["..."], "objective": "..."}

Dream: {dream}"#;

/// Low temperature keeps keyword choice stable between runs.
pub const EXTRACTION_TEMPERATURE: f32 = 0.2;

pub const EXTRACTION_MAX_TOKENS: u32 = 512;

/// Fill the template with `dream_text`.
pub fn build_extraction_prompt(dream_text: &str) -> String {
    DREAM_EXTRACTION_TEMPLATE.replacen(DREAM_SLOT, dream_text, 1)
}

/// The one request sent per extraction: a single user message.
pub fn build_extraction_request(dream_text: &str) -> LlmRequest {
    LlmRequest::new(vec![ChatMessage::user(build_extraction_prompt(dream_text))])
        .with_temperature(EXTRACTION_TEMPERATURE)
        .with_max_tokens(Some(EXTRACTION_MAX_TOKENS))
}
