//! Terrain sampling - random ground positions inside the spawn square.

use rand::Rng;

use dreamforge_domain::Position;

use crate::infrastructure::ports::WorldPort;

/// Height the downward ground probe starts from.
pub const PROBE_ALTITUDE: f32 = 1000.0;

/// One sampled position and whether the probe actually hit ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSample {
    pub x: f32,
    pub z: f32,
    pub position: Position,
    pub hit: bool,
}

/// Draw `x, z` uniformly from `[-bounds, bounds)` and probe the ground below.
///
/// A miss returns the origin. There is no retry: when no terrain exists,
/// every sample collapses onto `(0, 0, 0)` and callers must live with that.
/// Bounds that are not a finite positive number probe the origin column.
pub fn sample_ground_position<R: Rng + ?Sized>(
    world: &dyn WorldPort,
    bounds: f32,
    rng: &mut R,
) -> GroundSample {
    let (x, z) = if bounds.is_finite() && bounds > 0.0 {
        (signed_unit(rng) * bounds, signed_unit(rng) * bounds)
    } else {
        if bounds != 0.0 {
            tracing::warn!(bounds, "Unusable spawn bounds, sampling the origin column");
        }
        (0.0, 0.0)
    };

    match world.probe_ground(x, z, PROBE_ALTITUDE) {
        Some(position) => GroundSample {
            x,
            z,
            position,
            hit: true,
        },
        None => {
            tracing::debug!(x, z, "Ground probe missed, using origin");
            GroundSample {
                x,
                z,
                position: Position::ORIGIN,
                hit: false,
            }
        }
    }
}

/// Uniform draw from `[-1, 1)`.
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}
