//! In-memory world implementation for development and testing
//!
//! Keeps spawned instances in a map and models the ground as an optional flat
//! plane. It renders nothing and is suitable for the CLI and tests only.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use dreamforge_domain::{AtmosphereSettings, ObjectiveMode, Position, SpawnHandle};

use crate::infrastructure::ports::{SpawnRequest, WorldError, WorldPort};

/// Flat ground plane at `height`, covering `|x| <= half_extent` and
/// `|z| <= half_extent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    pub height: f32,
    pub half_extent: f32,
}

#[derive(Debug, Default)]
struct HeadlessState {
    next_handle: u64,
    live: BTreeMap<SpawnHandle, SpawnRequest>,
    atmosphere: Option<AtmosphereSettings>,
    objective: Option<ObjectiveMode>,
}

/// World without a renderer.
#[derive(Debug, Default)]
pub struct HeadlessWorld {
    ground: Option<FlatGround>,
    state: Mutex<HeadlessState>,
}

impl HeadlessWorld {
    /// World with nothing to stand on; every probe misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_ground(ground: FlatGround) -> Self {
        Self {
            ground: Some(ground),
            state: Mutex::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        // A panic while holding the lock leaves the maps consistent; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Instances currently alive, in spawn order.
    pub fn live_instances(&self) -> Vec<(SpawnHandle, SpawnRequest)> {
        self.state()
            .live
            .iter()
            .map(|(handle, request)| (*handle, request.clone()))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.state().live.len()
    }

    pub fn atmosphere(&self) -> Option<AtmosphereSettings> {
        self.state().atmosphere
    }

    pub fn objective(&self) -> Option<ObjectiveMode> {
        self.state().objective
    }
}

impl WorldPort for HeadlessWorld {
    fn spawn(&self, request: &SpawnRequest) -> Result<SpawnHandle, WorldError> {
        let mut state = self.state();
        state.next_handle += 1;
        let handle = SpawnHandle::new(state.next_handle);
        state.live.insert(handle, request.clone());
        tracing::trace!(%handle, asset = %request.asset, "Headless spawn");
        Ok(handle)
    }

    fn destroy(&self, handle: SpawnHandle) -> Result<(), WorldError> {
        self.state()
            .live
            .remove(&handle)
            .map(|_| ())
            .ok_or(WorldError::UnknownHandle(handle))
    }

    fn probe_ground(&self, x: f32, z: f32, altitude: f32) -> Option<Position> {
        let ground = self.ground?;
        let inside = x.abs() <= ground.half_extent && z.abs() <= ground.half_extent;
        (inside && ground.height <= altitude).then(|| Position::new(x, ground.height, z))
    }

    fn apply_atmosphere(&self, atmosphere: &AtmosphereSettings) {
        self.state().atmosphere = Some(*atmosphere);
    }

    fn activate_objective(&self, objective: ObjectiveMode) {
        self.state().objective = Some(objective);
    }
}
