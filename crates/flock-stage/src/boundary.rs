//! Boundary repulsion: pushes agents back toward the interior of the box.

use flock_core::{BoundaryVolume, WallRepulsion};
use glam::Vec3;

/// Magnitude of the push away from one face at signed distance `dst`.
///
/// Zero at or beyond `threshold`.  Without a `min_distance` floor the push
/// diverges as `dst → 0` and is `+inf` exactly on the face.
#[inline]
pub fn face_push(dst: f32, walls: &WallRepulsion) -> f32 {
    let mut d = dst.abs();
    if !(d < walls.threshold) {
        return 0.0;
    }
    if let Some(floor) = walls.min_distance {
        d = d.max(floor);
    }
    walls.weight / (d / walls.threshold)
}

/// Summed repulsion of all six faces on an agent at `p`.
///
/// Per axis, the negative face sits at `-h` and pushes toward `+axis`; the
/// positive face sits at `+h` and pushes toward `-axis`.  Each push lands
/// only on its own axis component, so an infinite push never turns the other
/// components into NaN.
pub fn wall_accel(p: Vec3, volume: &BoundaryVolume, walls: &WallRepulsion) -> Vec3 {
    let h = volume.half_extent;
    let axis = |h: f32, p: f32| face_push(-h - p, walls) - face_push(h - p, walls);
    Vec3::new(axis(h.x, p.x), axis(h.y, p.y), axis(h.z, p.z))
}

/// Add the boundary repulsion of every agent to its acceleration slot.
///
/// Reads `position`, writes only `acceleration[i]` for each `i`.
pub fn apply_boundary(
    position:     &[Vec3],
    acceleration: &mut [Vec3],
    volume:       &BoundaryVolume,
    walls:        &WallRepulsion,
) {
    debug_assert_eq!(position.len(), acceleration.len());

    #[cfg(not(feature = "parallel"))]
    {
        for (acc, &p) in acceleration.iter_mut().zip(position) {
            *acc += wall_accel(p, volume, walls);
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        acceleration
            .par_iter_mut()
            .zip(position.par_iter())
            .for_each(|(acc, &p)| *acc += wall_accel(p, volume, walls));
    }
}
