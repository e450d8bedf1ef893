//! Entities of the dream-to-scene pipeline.

mod dream_attributes;
mod rule_catalog;
mod scene_plan;

pub use dream_attributes::{DreamAttributes, DEFAULT_MOOD, DEFAULT_OBJECTIVE, DEFAULT_SETTING};
pub use rule_catalog::{
    CharacterRule, MoodProfiles, RuleCatalog, TerrainRule, DEFAULT_PLAYER_SPAWN_HEIGHT,
    DEFAULT_SPAWN_BOUNDS,
};
pub use scene_plan::{
    CharacterPlacement, GenerationIssue, ObjectPlacement, RuleKind, ScenePlan, TerrainPlacement,
};
