//! Velocity-limited integration.
//!
//! Per agent, in order:
//!
//! 1. `v' = v + a·dt`, then rescale `v'` so its magnitude lies in
//!    `[speed.min, speed.max]` without changing direction.
//! 2. Move the transform by `v'·dt` and turn it to face along `v'`.
//! 3. Clear the acceleration for the next tick.
//! 4. Copy the transform position back into the store.
//!
//! When `v'` has no usable direction the agent moves at `speed.min` and is
//! counted in [`IntegrateReport::degenerate`] rather than treated as an
//! error.  A non-finite `v'` comes from an unbounded wall push, so the agent
//! heads along the sign of the infinite components, back into the box.  A
//! zero `v'` keeps the previous velocity's direction, else the transform's
//! forward axis.

use flock_agent::AgentLanes;
use flock_core::{SpeedLimit, Transform, look_rotation};
use glam::Vec3;

/// Summary of one integration pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegrateReport {
    /// Agents whose new velocity had no direction and fell back to their
    /// previous heading.
    pub degenerate: usize,
}

/// Unit vector along the signs of the infinite components of `v`, if any.
#[inline]
fn escape_direction(v: Vec3) -> Option<Vec3> {
    let axis = |c: f32| if c.is_infinite() { c.signum() } else { 0.0 };
    Vec3::new(axis(v.x), axis(v.y), axis(v.z)).try_normalize()
}

/// Integrate a single agent.  Returns `true` if the degenerate fallback was
/// used.
#[inline]
pub fn integrate_agent(
    position:     &mut Vec3,
    velocity:     &mut Vec3,
    acceleration: &mut Vec3,
    transform:    &mut Transform,
    speed:        &SpeedLimit,
    dt:           f32,
) -> bool {
    let candidate = *velocity + *acceleration * dt;

    let (dir, magnitude, degenerate) = match candidate.try_normalize() {
        Some(dir) => (dir, speed.clamp(candidate.length()), false),
        None => {
            let dir = escape_direction(candidate)
                .or_else(|| velocity.try_normalize())
                .or_else(|| transform.forward().try_normalize())
                .unwrap_or(Vec3::Z);
            (dir, speed.min, true)
        }
    };

    *velocity = dir * magnitude;
    transform.position += *velocity * dt;
    transform.rotation = look_rotation(dir);
    *acceleration = Vec3::ZERO;
    *position = transform.position;

    degenerate
}

/// Integrate every agent.  Each task touches only its own index in the four
/// lanes.
pub fn apply_integrate(lanes: AgentLanes<'_>, speed: &SpeedLimit, dt: f32) -> IntegrateReport {
    let AgentLanes { position, velocity, acceleration, transforms } = lanes;

    #[cfg(not(feature = "parallel"))]
    let degenerate: usize = position
        .iter_mut()
        .zip(velocity.iter_mut())
        .zip(acceleration.iter_mut())
        .zip(transforms.iter_mut())
        .map(|(((p, v), a), t)| integrate_agent(p, v, a, t, speed, dt) as usize)
        .sum();

    #[cfg(feature = "parallel")]
    let degenerate: usize = {
        use rayon::prelude::*;

        position
            .par_iter_mut()
            .zip(velocity.par_iter_mut())
            .zip(acceleration.par_iter_mut())
            .zip(transforms.par_iter_mut())
            .map(|(((p, v), a), t)| integrate_agent(p, v, a, t, speed, dt) as usize)
            .sum()
    };

    IntegrateReport { degenerate }
}
