//! Application state and composition.

use std::sync::Arc;

use dreamforge_domain::RuleCatalog;

use crate::infrastructure::{
    clock::SystemClock,
    config::{EngineConfig, LlmBackend},
    headless_world::{FlatGround, HeadlessWorld},
    ollama::OllamaClient,
    placeholder_llm::PlaceholderLlm,
    ports::{ClockPort, LlmPort, StatusPort, WorldPort},
    resilient_llm::{ResilientLlmClient, RetryConfig},
};
use crate::use_cases::{ExtractDreamAttributes, ProcessDream};

/// Ground plane the headless world gets when a ground height is configured.
pub const HEADLESS_GROUND_HALF_EXTENT: f32 = 500.0;

/// Main application state.
pub struct App {
    pub llm: Arc<dyn LlmPort>,
    pub world: Arc<dyn WorldPort>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub extraction: Arc<ExtractDreamAttributes>,
    pub dream: Arc<ProcessDream>,
}

impl App {
    /// Wire every use case around the given collaborators.
    pub fn new(
        config: &EngineConfig,
        llm: Arc<dyn LlmPort>,
        world: Arc<dyn WorldPort>,
        catalog: RuleCatalog,
        status: Arc<dyn StatusPort>,
    ) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let dream = ProcessDream::builder()
            .llm(llm.clone())
            .world(world.clone())
            .catalog(Arc::new(catalog))
            .status(status)
            .clock(clock)
            .seed(config.seed)
            .build();

        let use_cases = UseCases {
            extraction: Arc::new(ExtractDreamAttributes::new(llm.clone())),
            dream: Arc::new(dream),
        };

        Self {
            llm,
            world,
            use_cases,
        }
    }
}

/// Text-completion backend selected by configuration.
///
/// Ollama is wrapped in the retrying client; the placeholder never fails and
/// is used as-is.
pub fn build_llm(config: &EngineConfig) -> Arc<dyn LlmPort> {
    match config.llm_backend {
        LlmBackend::Ollama => {
            let ollama = Arc::new(OllamaClient::with_timeout(
                &config.ollama_base_url,
                &config.ollama_model,
                config.llm_timeout_secs,
            ));
            let retry_config = RetryConfig::default().with_max_retries(config.llm_max_retries);
            tracing::info!(
                base_url = %config.ollama_base_url,
                model = %config.ollama_model,
                max_retries = retry_config.max_retries,
                base_delay_ms = retry_config.base_delay_ms,
                "LLM client configured"
            );
            Arc::new(ResilientLlmClient::new(ollama, retry_config))
        }
        LlmBackend::Placeholder => {
            tracing::info!("Using offline placeholder LLM");
            Arc::new(PlaceholderLlm)
        }
    }
}

/// Headless world, with a flat ground plane when a height is configured.
pub fn build_world(config: &EngineConfig) -> Arc<HeadlessWorld> {
    match config.ground_height {
        Some(height) => Arc::new(HeadlessWorld::with_ground(FlatGround {
            height,
            half_extent: HEADLESS_GROUND_HALF_EXTENT,
        })),
        None => {
            tracing::warn!("No ground configured, every placement falls back to the origin");
            Arc::new(HeadlessWorld::empty())
        }
    }
}
