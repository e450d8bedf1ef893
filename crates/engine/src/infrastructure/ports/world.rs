//! Renderer/world boundary.
//!
//! The pipeline never touches a rendering runtime directly. Whatever draws the
//! scene implements `WorldPort`; calls are synchronous because the ground
//! probe is a blocking query against the live world.

use dreamforge_domain::{AssetRef, AtmosphereSettings, ObjectiveMode, Position, SpawnHandle};

use super::error::WorldError;

/// What a spawned instance represents.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnKind {
    /// Terrain at the origin; the renderer swaps its skybox when present.
    Terrain { skybox: Option<AssetRef> },
    Character { hostile: bool },
    Object,
    Player,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub asset: AssetRef,
    pub kind: SpawnKind,
    pub position: Position,
    pub y_rotation_degrees: f32,
}

impl SpawnRequest {
    pub fn new(asset: AssetRef, kind: SpawnKind, position: Position) -> Self {
        Self {
            asset,
            kind,
            position,
            y_rotation_degrees: 0.0,
        }
    }

    pub fn with_rotation(mut self, y_rotation_degrees: f32) -> Self {
        self.y_rotation_degrees = y_rotation_degrees;
        self
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait WorldPort: Send + Sync {
    /// Instantiate an asset and hand back its handle.
    fn spawn(&self, request: &SpawnRequest) -> Result<SpawnHandle, WorldError>;

    /// Tear down a previously spawned instance.
    fn destroy(&self, handle: SpawnHandle) -> Result<(), WorldError>;

    /// Cast a ray straight down from `(x, altitude, z)`; returns the first
    /// ground hit, or `None` when nothing is below.
    fn probe_ground(&self, x: f32, z: f32, altitude: f32) -> Option<Position>;

    /// Push light, fog and ambience settings to the renderer.
    fn apply_atmosphere(&self, atmosphere: &AtmosphereSettings);

    /// Switch the game logic to the plan's objective.
    fn activate_objective(&self, objective: ObjectiveMode);
}
