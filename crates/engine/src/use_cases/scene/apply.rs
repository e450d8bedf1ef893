//! Plan application - instantiate a `ScenePlan` through the world port.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use dreamforge_domain::{PlanId, Position, ScenePlan, SpawnHandle};

use crate::infrastructure::ports::{ClockPort, SpawnKind, SpawnRequest, WorldError, WorldPort};

/// Instances spawned for one applied plan.
///
/// The next application consumes it and destroys every handle before
/// spawning anything new.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOwnership {
    pub plan_id: PlanId,
    pub handles: Vec<SpawnHandle>,
    pub applied_at: DateTime<Utc>,
}

pub struct ApplyScenePlan {
    world: Arc<dyn WorldPort>,
    clock: Arc<dyn ClockPort>,
}

impl ApplyScenePlan {
    pub fn new(world: Arc<dyn WorldPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { world, clock }
    }

    /// Tear down `previous`, then spawn everything in `plan`.
    ///
    /// On a spawn failure the handles spawned so far are destroyed before the
    /// error is returned.
    pub fn execute(
        &self,
        plan_id: PlanId,
        plan: &ScenePlan,
        previous: Option<SceneOwnership>,
    ) -> Result<SceneOwnership, WorldError> {
        if let Some(previous) = previous {
            self.teardown(previous);
        }

        let mut handles = Vec::with_capacity(plan.spawn_count());
        for request in spawn_requests(plan) {
            match self.world.spawn(&request) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    tracing::error!(
                        plan_id = %plan_id,
                        asset = %request.asset,
                        error = %e,
                        "Spawn failed, rolling back plan"
                    );
                    self.destroy_all(&handles);
                    return Err(e);
                }
            }
        }

        self.world.apply_atmosphere(&plan.atmosphere);
        self.world.activate_objective(plan.objective);

        tracing::info!(
            plan_id = %plan_id,
            spawned = handles.len(),
            objective = plan.objective.as_str(),
            "Scene plan applied"
        );

        Ok(SceneOwnership {
            plan_id,
            handles,
            applied_at: self.clock.now(),
        })
    }

    /// Destroy every instance of an applied plan. Returns how many were
    /// destroyed; failures are logged and skipped.
    pub fn teardown(&self, ownership: SceneOwnership) -> usize {
        let destroyed = self.destroy_all(&ownership.handles);
        tracing::debug!(
            plan_id = %ownership.plan_id,
            destroyed,
            owned = ownership.handles.len(),
            "Previous scene torn down"
        );
        destroyed
    }

    fn destroy_all(&self, handles: &[SpawnHandle]) -> usize {
        handles
            .iter()
            .filter(|handle| match self.world.destroy(**handle) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(handle = %handle, error = %e, "Failed to destroy instance");
                    false
                }
            })
            .count()
    }
}

/// Spawn order: terrain, characters, objects, player.
fn spawn_requests(plan: &ScenePlan) -> Vec<SpawnRequest> {
    let mut requests = Vec::with_capacity(plan.spawn_count());

    if let Some(terrain) = &plan.terrain {
        requests.push(SpawnRequest::new(
            terrain.terrain.clone(),
            SpawnKind::Terrain {
                skybox: terrain.skybox.clone(),
            },
            Position::ORIGIN,
        ));
    }

    for character in &plan.characters {
        if character.hostile {
            // Flag is forwarded; nothing reacts to it yet.
            tracing::debug!(asset = %character.asset, "Spawning hostile character");
        }
        requests.push(SpawnRequest::new(
            character.asset.clone(),
            SpawnKind::Character {
                hostile: character.hostile,
            },
            character.position,
        ));
    }

    for object in &plan.objects {
        requests.push(
            SpawnRequest::new(object.asset.clone(), SpawnKind::Object, object.position)
                .with_rotation(object.y_rotation_degrees),
        );
    }

    if let Some(player) = &plan.player_asset {
        requests.push(SpawnRequest::new(
            player.clone(),
            SpawnKind::Player,
            plan.player_spawn,
        ));
    }

    requests
}
