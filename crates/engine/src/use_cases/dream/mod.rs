//! Dream pipeline use case.
//!
//! One trigger runs extraction, composition and application in sequence:
//!
//! 1. Refuse the trigger while another request is in flight
//! 2. Check that extractor, world and catalog are wired
//! 3. Extract attributes (falling back to defaults on backend trouble)
//! 4. Compose a plan and apply it, replacing the previous scene
//!
//! Progress is reported through the `StatusPort` as it happens.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::sync::Mutex;

use dreamforge_domain::{DreamAttributes, PlanId, RuleCatalog, ScenePlan};

use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::ports::{
    ClockPort, LlmPort, PipelineStatus, StatusPort, WorldError, WorldPort,
};
use crate::infrastructure::status::TracingStatusSink;
use crate::use_cases::extraction::ExtractDreamAttributes;
use crate::use_cases::scene::{ApplyScenePlan, ComposeScene, SceneOwnership};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0} is not configured")]
    ConfigurationMissing(&'static str),
    #[error("A dream is already being processed")]
    Busy,
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Result of one successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedScene {
    pub plan_id: PlanId,
    pub attributes: DreamAttributes,
    pub plan: ScenePlan,
    /// True when the extractor fell back to default attributes.
    pub extraction_failed: bool,
}

/// State guarded for the whole duration of a request.
struct PipelineState {
    ownership: Option<SceneOwnership>,
    rng: StdRng,
}

/// Wired scene use cases; only present when a world is available.
struct SceneStage {
    compose: ComposeScene,
    apply: ApplyScenePlan,
}

pub struct ProcessDream {
    extractor: Option<Arc<ExtractDreamAttributes>>,
    scene: Option<SceneStage>,
    catalog: Option<Arc<RuleCatalog>>,
    status: Arc<dyn StatusPort>,
    state: Mutex<PipelineState>,
}

impl ProcessDream {
    pub fn builder() -> ProcessDreamBuilder {
        ProcessDreamBuilder::default()
    }

    /// Run the pipeline for `dream_text`.
    pub async fn execute(&self, dream_text: &str) -> Result<GeneratedScene, PipelineError> {
        let Ok(mut state) = self.state.try_lock() else {
            tracing::debug!("Dream trigger ignored, a request is in flight");
            return Err(PipelineError::Busy);
        };

        let (extractor, scene, catalog) = self.components()?;

        self.status.report(PipelineStatus::Processing);

        let extraction = extractor.extract(dream_text).await;
        let extraction_failed = match &extraction.failure {
            Some(failure) => {
                self.status
                    .report(PipelineStatus::BackendFailure(failure.to_string()));
                true
            }
            None => false,
        };
        let attributes = extraction.attributes;

        let state = &mut *state;
        let plan = scene.compose.execute(&attributes, catalog, &mut state.rng);
        let plan_id = PlanId::new();

        // The previous scene is torn down by the applier even when the new
        // one fails, so ownership is cleared before applying.
        let previous = state.ownership.take();
        match scene.apply.execute(plan_id, &plan, previous) {
            Ok(ownership) => state.ownership = Some(ownership),
            Err(e) => {
                tracing::error!(plan_id = %plan_id, error = %e, "Failed to apply scene plan");
                // One error report per request; a failed extraction already made it.
                if !extraction_failed {
                    self.status
                        .report(PipelineStatus::BackendFailure(e.to_string()));
                }
                return Err(PipelineError::World(e));
            }
        }

        if !extraction_failed {
            self.status.report(PipelineStatus::Success);
        }

        tracing::info!(
            plan_id = %plan_id,
            extraction_failed,
            spawned = plan.spawn_count(),
            "Dream processed"
        );

        Ok(GeneratedScene {
            plan_id,
            attributes,
            plan,
            extraction_failed,
        })
    }

    /// Plan id of the scene currently in the world, if any.
    pub async fn current_plan(&self) -> Option<PlanId> {
        self.state
            .lock()
            .await
            .ownership
            .as_ref()
            .map(|ownership| ownership.plan_id)
    }

    fn components(
        &self,
    ) -> Result<(&ExtractDreamAttributes, &SceneStage, &RuleCatalog), PipelineError> {
        let missing = |component: &'static str| {
            tracing::error!(component, "Pipeline component missing");
            self.status
                .report(PipelineStatus::ComponentUnavailable(component));
            PipelineError::ConfigurationMissing(component)
        };

        let extractor = self.extractor.as_deref().ok_or_else(|| missing("extractor"))?;
        let scene = self.scene.as_ref().ok_or_else(|| missing("world"))?;
        let catalog = self.catalog.as_deref().ok_or_else(|| missing("catalog"))?;
        Ok((extractor, scene, catalog))
    }
}

/// Collaborators are optional so a partially wired pipeline can still be
/// built; it refuses to run and says which piece is missing.
#[derive(Default)]
pub struct ProcessDreamBuilder {
    llm: Option<Arc<dyn LlmPort>>,
    world: Option<Arc<dyn WorldPort>>,
    catalog: Option<Arc<RuleCatalog>>,
    status: Option<Arc<dyn StatusPort>>,
    clock: Option<Arc<dyn ClockPort>>,
    seed: Option<u64>,
}

impl ProcessDreamBuilder {
    pub fn llm(mut self, llm: Arc<dyn LlmPort>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn world(mut self, world: Arc<dyn WorldPort>) -> Self {
        self.world = Some(world);
        self
    }

    pub fn catalog(mut self, catalog: Arc<RuleCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn status(mut self, status: Arc<dyn StatusPort>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Fixed seed for reproducible layouts; entropy when unset.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> ProcessDream {
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()) as Arc<dyn ClockPort>);
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        ProcessDream {
            extractor: self
                .llm
                .map(|llm| Arc::new(ExtractDreamAttributes::new(llm))),
            scene: self.world.map(|world| SceneStage {
                compose: ComposeScene::new(world.clone()),
                apply: ApplyScenePlan::new(world, clock),
            }),
            catalog: self.catalog,
            status: self
                .status
                .unwrap_or_else(|| Arc::new(TracingStatusSink) as Arc<dyn StatusPort>),
            state: Mutex::new(PipelineState {
                ownership: None,
                rng,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::headless_world::{FlatGround, HeadlessWorld};
    use crate::infrastructure::placeholder_llm::PlaceholderLlm;
    use crate::infrastructure::ports::{
        LlmError, LlmRequest, LlmResponse, MockLlmPort, MockStatusPort, MockWorldPort,
    };
    use crate::infrastructure::status::MemoryStatusSink;
    use dreamforge_domain::{AssetRef, Position};
    use mockall::predicate::eq;
    use tokio::sync::Notify;

    fn asset(name: &str) -> AssetRef {
        AssetRef::new(name).unwrap()
    }

    fn catalog() -> Arc<RuleCatalog> {
        Arc::new(
            RuleCatalog::default()
                .with_terrain_rule("forest", asset("terrain/forest"), None)
                .with_character_rule("owl", asset("npc/owl"), false)
                .with_object_assets([asset("props/crystal")]),
        )
    }

    fn world() -> Arc<HeadlessWorld> {
        Arc::new(HeadlessWorld::with_ground(FlatGround {
            height: 0.0,
            half_extent: 100.0,
        }))
    }

    fn llm_answering(content: &'static str) -> Arc<dyn LlmPort> {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(move |_| Ok(LlmResponse::text(content)));
        Arc::new(llm)
    }

    const FOREST: &str = r#"{"setting": "forest", "mood": "peaceful", "characters": ["owl"], "objects": ["crystal"], "objective": "explore"}"#;

    #[tokio::test]
    async fn successful_run_reports_processing_then_success() {
        let status = Arc::new(MemoryStatusSink::new());
        let pipeline = ProcessDream::builder()
            .llm(llm_answering(FOREST))
            .world(world())
            .catalog(catalog())
            .status(status.clone())
            .seed(Some(1))
            .build();

        let scene = pipeline.execute("a forest dream").await.unwrap();

        assert!(!scene.extraction_failed);
        assert_eq!(scene.plan.characters.len(), 1);
        assert_eq!(
            status.reports(),
            vec![PipelineStatus::Processing, PipelineStatus::Success]
        );
        assert_eq!(pipeline.current_plan().await, Some(scene.plan_id));
    }

    #[tokio::test]
    async fn missing_components_are_reported_by_name() {
        for (builder, component) in [
            (
                ProcessDream::builder().world(world()).catalog(catalog()),
                "extractor",
            ),
            (
                ProcessDream::builder()
                    .llm(Arc::new(PlaceholderLlm))
                    .catalog(catalog()),
                "world",
            ),
            (
                ProcessDream::builder()
                    .llm(Arc::new(PlaceholderLlm))
                    .world(world()),
                "catalog",
            ),
        ] {
            let status = Arc::new(MemoryStatusSink::new());
            let pipeline = builder.status(status.clone()).build();

            let err = pipeline.execute("dream").await.unwrap_err();

            assert!(matches!(err, PipelineError::ConfigurationMissing(c) if c == component));
            assert_eq!(
                status.reports(),
                vec![PipelineStatus::ComponentUnavailable(component)]
            );
        }
    }

    #[tokio::test]
    async fn backend_failure_is_reported_once_and_plan_still_returned() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("connection refused".into())));

        let mut status = MockStatusPort::new();
        status
            .expect_report()
            .with(eq(PipelineStatus::Processing))
            .times(1)
            .return_const(());
        status
            .expect_report()
            .withf(|s| matches!(s, PipelineStatus::BackendFailure(m) if m.contains("connection refused")))
            .times(1)
            .return_const(());
        status
            .expect_report()
            .with(eq(PipelineStatus::Success))
            .never();

        let pipeline = ProcessDream::builder()
            .llm(Arc::new(llm))
            .world(world())
            .catalog(catalog())
            .status(Arc::new(status))
            .seed(Some(9))
            .build();

        let scene = pipeline.execute("a forest dream").await.unwrap();

        assert!(scene.extraction_failed);
        assert_eq!(scene.attributes, DreamAttributes::fallback("a forest dream"));
        assert!(scene.plan.terrain.is_none());
    }

    #[tokio::test]
    async fn second_dream_replaces_first_scene() {
        let world = world();
        let pipeline = ProcessDream::builder()
            .llm(llm_answering(FOREST))
            .world(world.clone())
            .catalog(catalog())
            .seed(Some(3))
            .build();

        let first = pipeline.execute("first").await.unwrap();
        let second = pipeline.execute("second").await.unwrap();

        assert_ne!(first.plan_id, second.plan_id);
        assert_eq!(world.live_count(), second.plan.spawn_count());
    }

    #[tokio::test]
    async fn world_failure_surfaces_as_error() {
        let mut world = MockWorldPort::new();
        world
            .expect_probe_ground()
            .returning(|x, z, _| Some(Position::new(x, 0.0, z)));
        world
            .expect_spawn()
            .returning(|request| Err(WorldError::spawn_failed(&request.asset, "renderer offline")));

        let status = Arc::new(MemoryStatusSink::new());
        let pipeline = ProcessDream::builder()
            .llm(llm_answering(FOREST))
            .world(Arc::new(world))
            .catalog(catalog())
            .status(status.clone())
            .build();

        let err = pipeline.execute("a forest dream").await.unwrap_err();

        assert!(matches!(err, PipelineError::World(WorldError::SpawnFailed { .. })));
        assert!(status.current().unwrap().is_error());
        assert_eq!(pipeline.current_plan().await, None);
    }

    #[tokio::test]
    async fn extraction_and_world_failure_report_one_error() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("connection refused".into())));
        let mut world = MockWorldPort::new();
        world.expect_probe_ground().returning(|_, _, _| None);
        world
            .expect_spawn()
            .returning(|request| Err(WorldError::spawn_failed(&request.asset, "renderer offline")));

        let status = Arc::new(MemoryStatusSink::new());
        let pipeline = ProcessDream::builder()
            .llm(Arc::new(llm))
            .world(Arc::new(world))
            .catalog(Arc::new(
                RuleCatalog::default().with_player(asset("player/dreamer"), 2.0),
            ))
            .status(status.clone())
            .build();

        let err = pipeline.execute("a forest dream").await.unwrap_err();

        assert!(matches!(err, PipelineError::World(_)));
        let reports = status.reports();
        assert_eq!(reports.iter().filter(|s| s.is_error()).count(), 1);
        assert!(!reports.contains(&PipelineStatus::Success));
    }

    #[tokio::test]
    async fn concurrent_trigger_is_busy() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().returning(|_| Ok(LlmResponse::text(FOREST)));
        let gated = GatedLlm::new(Arc::new(llm));
        let entered = gated.entered.clone();
        let release = gated.release.clone();

        let pipeline = Arc::new(
            ProcessDream::builder()
                .llm(Arc::new(gated))
                .world(world())
                .catalog(catalog())
                .build(),
        );

        let running = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.execute("first").await })
        };
        entered.notified().await;

        let err = pipeline.execute("second").await.unwrap_err();
        assert!(matches!(err, PipelineError::Busy));

        release.notify_one();
        assert!(running.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn same_seed_same_layout() {
        let run = |seed| async move {
            ProcessDream::builder()
                .llm(llm_answering(FOREST))
                .world(world())
                .catalog(catalog())
                .seed(Some(seed))
                .build()
                .execute("a forest dream")
                .await
                .unwrap()
                .plan
        };

        assert_eq!(run(11).await, run(11).await);
    }

    /// Holds every completion until released, so a second trigger overlaps the first.
    struct GatedLlm {
        inner: Arc<dyn LlmPort>,
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    impl GatedLlm {
        fn new(inner: Arc<dyn LlmPort>) -> Self {
            Self {
                inner,
                entered: Arc::new(Notify::new()),
                release: Arc::new(Notify::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmPort for GatedLlm {
        async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.generate(request).await
        }
    }
}
