//! Shared setup for E2E tests.

use std::sync::Arc;

use dreamforge_domain::RuleCatalog;

use crate::app::App;
use crate::infrastructure::catalog::parse_catalog;
use crate::infrastructure::config::{EngineConfig, LlmBackend};
use crate::infrastructure::headless_world::{FlatGround, HeadlessWorld};
use crate::infrastructure::ports::{LlmError, LlmPort, LlmResponse, MockLlmPort};
use crate::infrastructure::status::MemoryStatusSink;

/// The catalog a fresh checkout runs with.
pub const SAMPLE_CATALOG: &str = include_str!("../../../../catalog.json");

pub const GROUND_HEIGHT: f32 = 1.5;

pub fn sample_catalog() -> RuleCatalog {
    parse_catalog(SAMPLE_CATALOG).expect("sample catalog should be valid")
}

/// LLM that answers every request with `content`.
pub fn scripted_llm(content: &'static str) -> Arc<dyn LlmPort> {
    let mut llm = MockLlmPort::new();
    llm.expect_generate()
        .returning(move |_| Ok(LlmResponse::text(content)));
    Arc::new(llm)
}

/// LLM that is never reachable.
pub fn unreachable_llm() -> Arc<dyn LlmPort> {
    let mut llm = MockLlmPort::new();
    llm.expect_generate()
        .returning(|_| Err(LlmError::RequestFailed("connection refused".into())));
    Arc::new(llm)
}

pub struct E2ETestContext {
    pub app: App,
    pub world: Arc<HeadlessWorld>,
    pub status: Arc<MemoryStatusSink>,
}

impl E2ETestContext {
    pub fn setup(llm: Arc<dyn LlmPort>) -> Self {
        Self::setup_with_catalog(llm, sample_catalog())
    }

    pub fn setup_with_catalog(llm: Arc<dyn LlmPort>, catalog: RuleCatalog) -> Self {
        let config = EngineConfig {
            llm_backend: LlmBackend::Placeholder,
            seed: Some(2024),
            ground_height: Some(GROUND_HEIGHT),
            ..EngineConfig::default()
        };
        let world = Arc::new(HeadlessWorld::with_ground(FlatGround {
            height: GROUND_HEIGHT,
            half_extent: 100.0,
        }));
        let status = Arc::new(MemoryStatusSink::new());
        let app = App::new(&config, llm, world.clone(), catalog, status.clone());

        Self { app, world, status }
    }
}
