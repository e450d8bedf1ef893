//! DreamForge domain - the types that flow from dream text to scene plan.
//!
//! No I/O and no randomness live here; the engine injects both.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    CharacterPlacement, CharacterRule, DreamAttributes, GenerationIssue, MoodProfiles,
    ObjectPlacement, RuleCatalog, RuleKind, ScenePlan, TerrainPlacement, TerrainRule,
    DEFAULT_MOOD, DEFAULT_OBJECTIVE, DEFAULT_SETTING, DEFAULT_SPAWN_BOUNDS,
    DEFAULT_PLAYER_SPAWN_HEIGHT,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{PlanId, SpawnHandle};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    keyword_matches, AssetRef, AtmosphereSettings, Color, FogSettings, Mood, ObjectiveMode,
    Position,
};
