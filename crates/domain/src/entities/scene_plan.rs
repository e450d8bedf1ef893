//! Scene plan - the renderer-agnostic output of composition.

use serde::{Deserialize, Serialize};

use crate::value_objects::{AssetRef, AtmosphereSettings, ObjectiveMode, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainPlacement {
    pub terrain: AssetRef,
    pub skybox: Option<AssetRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPlacement {
    pub asset: AssetRef,
    pub position: Position,
    /// Flag only; hostile behavior is not implemented
    pub hostile: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    pub asset: AssetRef,
    pub position: Position,
    /// Rotation around the up axis, in `[0, 360)`
    pub y_rotation_degrees: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Terrain,
    Character,
}

/// Non-fatal conditions met while composing. They thin out the plan but
/// never fail it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationIssue {
    /// No rule of `kind` matched `keyword`; the placement was omitted.
    NoRuleMatch { kind: RuleKind, keyword: String },
    /// The ground probe at `(x, z)` hit nothing; the origin was used.
    GroundProbeMiss { x: f32, z: f32 },
}

/// Everything the renderer needs to build one generated scene.
///
/// Created fresh per request and never mutated after composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub atmosphere: AtmosphereSettings,
    pub terrain: Option<TerrainPlacement>,
    pub characters: Vec<CharacterPlacement>,
    pub objects: Vec<ObjectPlacement>,
    pub player_spawn: Position,
    pub player_asset: Option<AssetRef>,
    pub objective: ObjectiveMode,
    #[serde(default)]
    pub issues: Vec<GenerationIssue>,
}

impl ScenePlan {
    /// Number of instances the renderer will spawn for this plan.
    pub fn spawn_count(&self) -> usize {
        usize::from(self.terrain.is_some())
            + self.characters.len()
            + self.objects.len()
            + usize::from(self.player_asset.is_some())
    }

    pub fn probe_misses(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, GenerationIssue::GroundProbeMiss { .. }))
            .count()
    }
}
