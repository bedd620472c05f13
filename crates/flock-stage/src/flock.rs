//! Separation / alignment / cohesion steering.
//!
//! Brute force: every agent scans every other agent, O(n²) per tick.
//!
//! All three sums are divided by the *whole* population `n`, not by the
//! neighbour count, so each neighbour's influence shrinks as the flock
//! grows.  Cohesion pulls toward `pos_avg - p[i]`, the averaged neighbour
//! position offset by the agent's own position.  Note that with no
//! neighbours `pos_avg` is zero and the cohesion term becomes `-p[i]`, a
//! weak pull toward the origin.

use flock_core::FlockParams;
use glam::Vec3;

/// Steering acceleration of agent `i` against the snapshot
/// `positions`/`velocities`.
pub fn flock_accel(
    i:          usize,
    positions:  &[Vec3],
    velocities: &[Vec3],
    params:     &FlockParams,
) -> Vec3 {
    let n = positions.len();
    let pos = positions[i];
    let radius_sq = params.neighbor_distance * params.neighbor_distance;

    let mut separation = Vec3::ZERO;
    let mut velocity_sum = Vec3::ZERO;
    let mut position_sum = Vec3::ZERO;

    for (j, (&other_pos, &other_vel)) in positions.iter().zip(velocities).enumerate() {
        if j == i {
            continue;
        }
        let diff = pos - other_pos;
        if diff.length_squared() < radius_sq {
            // Coincident agents contribute no separation direction.
            separation += diff.normalize_or_zero();
            velocity_sum += other_vel;
            position_sum += other_pos;
        }
    }

    let inv_n = 1.0 / n as f32;
    separation * inv_n * params.separation
        + velocity_sum * inv_n * params.alignment
        + (position_sum * inv_n - pos) * params.cohesion
}

/// Add the steering acceleration of every agent to its acceleration slot.
///
/// Every agent reads the same pre-integration `position`/`velocity`
/// snapshot; each task writes only its own `acceleration[i]`.
pub fn apply_flock(
    position:     &[Vec3],
    velocity:     &[Vec3],
    acceleration: &mut [Vec3],
    params:       &FlockParams,
) {
    debug_assert_eq!(position.len(), velocity.len());
    debug_assert_eq!(position.len(), acceleration.len());

    #[cfg(not(feature = "parallel"))]
    {
        for (i, acc) in acceleration.iter_mut().enumerate() {
            *acc += flock_accel(i, position, velocity, params);
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        acceleration
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, acc)| *acc += flock_accel(i, position, velocity, params));
    }
}
