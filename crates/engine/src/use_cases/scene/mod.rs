//! Scene use cases.
//!
//! - Composing a `ScenePlan` from dream attributes and the rule catalog
//! - Applying a plan to the world, replacing whatever the last plan spawned

mod apply;
mod compose;
mod sampling;

pub use apply::{ApplyScenePlan, SceneOwnership};
pub use compose::ComposeScene;
pub use sampling::{sample_ground_position, GroundSample, PROBE_ALTITUDE};
