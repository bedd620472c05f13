//! Per-agent transform handed to the rendering side.
//!
//! Axis convention: +Y is up and +Z is forward, so an identity rotation
//! faces +Z.

use glam::{Mat3, Quat, Vec3};

use crate::VisualId;

/// Position + orientation of one agent's visual object.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    /// The visual object this transform drives.
    pub visual:   VisualId,
}

impl Transform {
    /// Transform at the origin facing +Z.
    #[inline]
    pub fn at_origin(visual: VisualId) -> Self {
        Self { position: Vec3::ZERO, rotation: Quat::IDENTITY, visual }
    }

    /// Unit vector the transform currently faces.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Rotation whose +Z axis points along `dir`, keeping +Y as close to world up
/// as possible.
///
/// `dir` need not be normalised.  A zero `dir` yields the identity.  When
/// `dir` is parallel to world up the shortest-arc rotation from +Z is used
/// instead, since "up" no longer constrains the roll.
pub fn look_rotation(dir: Vec3) -> Quat {
    let forward = dir.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let right = Vec3::Y.cross(forward).normalize_or_zero();
    if right == Vec3::ZERO {
        return Quat::from_rotation_arc(Vec3::Z, forward);
    }
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
}
