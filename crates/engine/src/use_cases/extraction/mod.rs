//! Dream attribute extraction use case.
//!
//! Sends the dream text to the LLM through the fixed extraction prompt and
//! turns the completion into `DreamAttributes`. Extraction never fails from
//! the caller's point of view: any backend or parsing problem yields the
//! fully defaulted record for the same raw text.

mod prompt;
mod response_parser;

use std::sync::Arc;

use dreamforge_domain::DreamAttributes;

use crate::infrastructure::ports::{LlmError, LlmPort};

pub use prompt::{
    build_extraction_prompt, build_extraction_request, DREAM_EXTRACTION_TEMPLATE, DREAM_SLOT,
};
pub use response_parser::{parse_dream_attributes, strip_special_tokens};

/// Why the extractor fell back to default attributes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionFailure {
    #[error(transparent)]
    Backend(#[from] LlmError),
    #[error("Malformed extraction response: {0}")]
    MalformedResponse(String),
}

/// Attributes plus, when the fallback was used, the reason.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub attributes: DreamAttributes,
    pub failure: Option<ExtractionFailure>,
}

impl Extraction {
    fn recovered(raw_text: &str, failure: ExtractionFailure) -> Self {
        Self {
            attributes: DreamAttributes::fallback(raw_text),
            failure: Some(failure),
        }
    }
}

pub struct ExtractDreamAttributes {
    llm: Arc<dyn LlmPort>,
}

impl ExtractDreamAttributes {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    /// Extract attributes, discarding the failure reason.
    pub async fn execute(&self, dream_text: &str) -> DreamAttributes {
        self.extract(dream_text).await.attributes
    }

    /// Extract attributes and report whether the fallback record was used.
    pub async fn extract(&self, dream_text: &str) -> Extraction {
        tracing::info!(chars = dream_text.chars().count(), "Dream extraction requested");

        let request = build_extraction_request(dream_text);
        let response = match self.llm.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Extraction backend failed, using default attributes");
                return Extraction::recovered(dream_text, ExtractionFailure::Backend(e));
            }
        };

        match parse_dream_attributes(dream_text, &response.content) {
            Ok(attributes) => {
                tracing::debug!(
                    setting = attributes.setting(),
                    mood = attributes.mood(),
                    characters = attributes.characters().len(),
                    objects = attributes.objects().len(),
                    objective = attributes.objective(),
                    "Dream attributes extracted"
                );
                Extraction {
                    attributes,
                    failure: None,
                }
            }
            Err(reason) => {
                tracing::warn!(
                    reason = %reason,
                    finish_reason = ?response.finish_reason,
                    "Malformed extraction response, using default attributes"
                );
                Extraction::recovered(dream_text, ExtractionFailure::MalformedResponse(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::placeholder_llm::PlaceholderLlm;
    use crate::infrastructure::ports::{LlmResponse, MockLlmPort};

    const DREAM: &str = "A peaceful forest with a wise old owl and a glowing crystal, explore";

    fn llm_answering(content: &'static str) -> MockLlmPort {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(move |_| Ok(LlmResponse::text(content)));
        llm
    }

    #[tokio::test]
    async fn sends_the_filled_template_once() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|request| {
                request.messages.len() == 1 && request.messages[0].content == build_extraction_prompt(DREAM)
            })
            .times(1)
            .returning(|_| Ok(LlmResponse::text(r#"{"setting": "forest"}"#)));

        let attrs = ExtractDreamAttributes::new(Arc::new(llm)).execute(DREAM).await;
        assert_eq!(attrs.setting(), "forest");
    }

    #[tokio::test]
    async fn well_formed_response_has_no_failure() {
        let llm = llm_answering(
            r#"{"setting": "forest", "mood": "peaceful", "characters": ["owl"], "objects": ["crystal"], "objective": "explore"}"#,
        );
        let extraction = ExtractDreamAttributes::new(Arc::new(llm)).extract(DREAM).await;

        assert!(extraction.failure.is_none());
        assert_eq!(extraction.attributes.raw_text(), DREAM);
        assert_eq!(extraction.attributes.characters(), ["owl"]);
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_defaults() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("connection refused".into())));

        let extraction = ExtractDreamAttributes::new(Arc::new(llm)).extract(DREAM).await;

        assert_eq!(extraction.attributes, DreamAttributes::fallback(DREAM));
        assert!(matches!(
            extraction.failure,
            Some(ExtractionFailure::Backend(LlmError::RequestFailed(_)))
        ));
    }

    #[tokio::test]
    async fn malformed_response_falls_back_to_defaults() {
        let llm = llm_answering("The dream is about a forest.");
        let extraction = ExtractDreamAttributes::new(Arc::new(llm)).extract(DREAM).await;

        assert_eq!(extraction.attributes, DreamAttributes::fallback(DREAM));
        assert!(matches!(
            extraction.failure,
            Some(ExtractionFailure::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn placeholder_backend_yields_placeholder_record() {
        let attrs = ExtractDreamAttributes::new(Arc::new(PlaceholderLlm))
            .execute("anything")
            .await;

        assert_eq!(attrs.setting(), "placeholder");
        assert_eq!(attrs.mood(), "mysterious");
        assert_eq!(attrs.characters(), ["placeholder"]);
        assert_eq!(attrs.objects(), ["placeholder"]);
        assert_eq!(attrs.objective(), "explore");
    }
}
