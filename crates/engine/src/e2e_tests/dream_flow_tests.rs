//! E2E tests for the dream pipeline.
//!
//! Tests verify:
//! - A described dream ends up as matching instances in the world
//! - An unreachable backend still produces a (default) scene
//! - Consecutive dreams replace each other

use dreamforge_domain::{
    AssetRef, AtmosphereSettings, GenerationIssue, ObjectiveMode, Position, RuleKind,
};

use super::{scripted_llm, unreachable_llm, E2ETestContext, GROUND_HEIGHT};
use crate::infrastructure::ports::{PipelineStatus, SpawnKind};

const FOREST_DREAM: &str =
    "I was walking in a peaceful forest. A wise old owl watched me from a branch and I found a glowing crystal. I wanted to explore.";

const FOREST_RESPONSE: &str = r#"```json
{"setting": "peaceful forest", "mood": "Peaceful", "characters": ["wise old owl"], "objects": ["glowing crystal"], "objective": "explore"}
```"#;

const CAVE_RESPONSE: &str = r#"{"setting": "dark cave", "mood": "scary", "characters": ["goblin", "GOBLIN-king", "bat"], "objects": [], "objective": "chase"}"#;

fn asset(name: &str) -> AssetRef {
    AssetRef::new(name).unwrap()
}

/// Test the forest/owl/crystal dream from text to live instances.
#[tokio::test]
async fn test_forest_dream_builds_scene() {
    let ctx = E2ETestContext::setup(scripted_llm(FOREST_RESPONSE));

    let scene = ctx
        .app
        .use_cases
        .dream
        .execute(FOREST_DREAM)
        .await
        .expect("Pipeline should succeed");

    assert!(!scene.extraction_failed);
    assert_eq!(scene.attributes.raw_text(), FOREST_DREAM);

    let plan = &scene.plan;
    assert_eq!(plan.atmosphere, AtmosphereSettings::peaceful());
    assert_eq!(
        plan.terrain.as_ref().map(|t| &t.terrain),
        Some(&asset("terrain/forest"))
    );
    assert_eq!(plan.characters.len(), 1);
    assert_eq!(plan.characters[0].asset, asset("characters/owl"));
    assert!(!plan.characters[0].hostile);
    assert_eq!(plan.characters[0].position.y, GROUND_HEIGHT);
    assert_eq!(plan.objects.len(), 1);
    assert_eq!(plan.objective, ObjectiveMode::Explore);
    assert_eq!(plan.player_spawn.y, GROUND_HEIGHT + 2.0);
    assert!(plan.issues.is_empty());

    // terrain, owl, crystal pick, player
    assert_eq!(ctx.world.live_count(), 4);
    assert_eq!(ctx.world.atmosphere(), Some(AtmosphereSettings::peaceful()));
    assert_eq!(ctx.world.objective(), Some(ObjectiveMode::Explore));

    let terrain = ctx
        .world
        .live_instances()
        .into_iter()
        .find(|(_, request)| matches!(request.kind, SpawnKind::Terrain { .. }))
        .expect("Terrain should be spawned");
    assert_eq!(terrain.1.position, Position::ORIGIN);
    assert_eq!(
        terrain.1.kind,
        SpawnKind::Terrain {
            skybox: Some(asset("skybox/dusk"))
        }
    );

    assert_eq!(
        ctx.status.reports(),
        vec![PipelineStatus::Processing, PipelineStatus::Success]
    );
}

/// Test that hostile characters match by substring and unknown ones are skipped.
#[tokio::test]
async fn test_cave_dream_with_hostiles() {
    let ctx = E2ETestContext::setup(scripted_llm(CAVE_RESPONSE));

    let scene = ctx
        .app
        .use_cases
        .dream
        .execute("A goblin chased me through a cave")
        .await
        .expect("Pipeline should succeed");

    let plan = &scene.plan;
    assert_eq!(plan.atmosphere, AtmosphereSettings::scary());
    assert_eq!(plan.objective, ObjectiveMode::Chase);
    assert_eq!(plan.characters.len(), 2);
    assert!(plan.characters.iter().all(|c| c.hostile));
    assert!(plan.objects.is_empty());
    assert_eq!(
        plan.issues,
        vec![GenerationIssue::NoRuleMatch {
            kind: RuleKind::Character,
            keyword: "bat".into(),
        }]
    );
}

/// Test that an unreachable backend still yields the default scene.
#[tokio::test]
async fn test_unreachable_backend_falls_back() {
    let ctx = E2ETestContext::setup(unreachable_llm());

    let scene = ctx
        .app
        .use_cases
        .dream
        .execute(FOREST_DREAM)
        .await
        .expect("Pipeline should still return a scene");

    assert!(scene.extraction_failed);
    assert_eq!(scene.plan.atmosphere, AtmosphereSettings::neutral());
    assert!(scene.plan.terrain.is_none());
    assert!(scene.plan.characters.is_empty());
    assert!(scene.plan.objects.is_empty());
    assert_eq!(scene.plan.objective, ObjectiveMode::Explore);

    // Only the player remains.
    assert_eq!(ctx.world.live_count(), 1);

    let reports = ctx.status.reports();
    assert_eq!(reports[0], PipelineStatus::Processing);
    assert_eq!(reports.iter().filter(|s| s.is_error()).count(), 1);
    assert!(!reports.contains(&PipelineStatus::Success));
}

/// Test that a second dream tears down the first scene.
#[tokio::test]
async fn test_second_dream_replaces_first() {
    let ctx = E2ETestContext::setup(scripted_llm(FOREST_RESPONSE));
    let dream = &ctx.app.use_cases.dream;

    let first = dream.execute(FOREST_DREAM).await.expect("First dream");
    let first_handles: Vec<_> = ctx
        .world
        .live_instances()
        .into_iter()
        .map(|(handle, _)| handle)
        .collect();

    let second = dream.execute(FOREST_DREAM).await.expect("Second dream");

    assert_ne!(first.plan_id, second.plan_id);
    assert_eq!(ctx.world.live_count(), second.plan.spawn_count());
    assert!(ctx
        .world
        .live_instances()
        .iter()
        .all(|(handle, _)| !first_handles.contains(handle)));
    assert_eq!(dream.current_plan().await, Some(second.plan_id));
}

/// Test the attributes-only extraction path used by the CLI flag.
#[tokio::test]
async fn test_extraction_only() {
    let ctx = E2ETestContext::setup(scripted_llm(FOREST_RESPONSE));

    let attributes = ctx.app.use_cases.extraction.execute(FOREST_DREAM).await;

    assert_eq!(attributes.setting(), "peaceful forest");
    assert_eq!(attributes.mood(), "Peaceful");
    assert_eq!(attributes.characters(), ["wise old owl"]);
    assert_eq!(attributes.objects(), ["glowing crystal"]);
    assert_eq!(ctx.world.live_count(), 0);
}

/// Test that the generated scene serializes for the CLI output.
#[tokio::test]
async fn test_generated_scene_serializes() {
    let ctx = E2ETestContext::setup(scripted_llm(FOREST_RESPONSE));
    let scene = ctx
        .app
        .use_cases
        .dream
        .execute(FOREST_DREAM)
        .await
        .expect("Pipeline should succeed");

    let json = serde_json::to_value(&scene).expect("Scene should serialize");

    assert_eq!(json["plan"]["objective"], "explore");
    assert_eq!(json["plan"]["terrain"]["terrain"], "terrain/forest");
    assert_eq!(json["extraction_failed"], false);
}
