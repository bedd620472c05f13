//! Static simulation configuration.
//!
//! Everything here is read once at startup and never mutated afterwards.
//! Applications typically load a [`FlockConfig`] from a JSON file (with the
//! `serde` feature) and pass it to `flock_sim::SimBuilder`, which calls
//! [`FlockConfig::validate`] before building anything.

use glam::Vec3;

use crate::{FlockError, FlockResult};

// ── BoundaryVolume ────────────────────────────────────────────────────────────

/// Axis-aligned box centred on the origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryVolume {
    /// Half the box size along each axis.
    pub half_extent: Vec3,
}

impl BoundaryVolume {
    #[inline]
    pub fn new(half_extent: Vec3) -> Self {
        Self { half_extent }
    }

    /// Build from the full edge lengths of the box.
    #[inline]
    pub fn from_size(size: Vec3) -> Self {
        Self { half_extent: size * 0.5 }
    }

    /// `true` if `p` lies inside or on the box.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.abs().cmple(self.half_extent).all()
    }
}

impl Default for BoundaryVolume {
    fn default() -> Self {
        Self { half_extent: Vec3::splat(10.0) }
    }
}

// ── WallRepulsion ─────────────────────────────────────────────────────────────

/// Shape of the per-face repulsion curve.
///
/// Within `threshold` of a face the push is `weight / (d / threshold)`,
/// which grows without bound as `d → 0`.  Setting `min_distance` floors `d`
/// before the division and so caps the push at
/// `weight * threshold / min_distance`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WallRepulsion {
    pub threshold:    f32,
    pub weight:       f32,
    pub min_distance: Option<f32>,
}

impl Default for WallRepulsion {
    fn default() -> Self {
        Self { threshold: 3.0, weight: 2.0, min_distance: None }
    }
}

// ── FlockParams ───────────────────────────────────────────────────────────────

/// Steering weights and neighbourhood radius.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockParams {
    pub separation:        f32,
    pub alignment:         f32,
    pub cohesion:          f32,
    /// Agents closer than this (strictly) count as neighbours.
    pub neighbor_distance: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            separation:        1.5,
            alignment:         1.0,
            cohesion:          1.0,
            neighbor_distance: 3.0,
        }
    }
}

// ── SpeedLimit ────────────────────────────────────────────────────────────────

/// Bounds on the velocity magnitude enforced by the integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedLimit {
    pub min: f32,
    pub max: f32,
}

impl SpeedLimit {
    #[inline]
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, speed: f32) -> f32 {
        speed.clamp(self.min, self.max)
    }
}

impl Default for SpeedLimit {
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

// ── FlockConfig ───────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockConfig {
    pub boundary: BoundaryVolume,
    pub walls:    WallRepulsion,
    pub flock:    FlockParams,
    pub speed:    SpeedLimit,

    /// Agents created before the first tick.
    pub initial_population: usize,

    /// Seed of the process-wide RNG stream.
    pub seed: u64,

    /// Default step length in seconds, used by `Sim::step`.
    pub dt: f32,

    /// Ticks run by `Sim::run`.
    pub total_ticks: u64,

    /// Worker thread count for the stage passes.  `None` uses Rayon's
    /// global pool (all logical cores).
    pub num_threads: Option<usize>,

    /// Emit a full agent snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            boundary:              BoundaryVolume::default(),
            walls:                 WallRepulsion::default(),
            flock:                 FlockParams::default(),
            speed:                 SpeedLimit::default(),
            initial_population:    500,
            seed:                  1,
            dt:                    1.0 / 60.0,
            total_ticks:           600,
            num_threads:           None,
            output_interval_ticks: 60,
        }
    }
}

impl FlockConfig {
    /// Reject configurations the stages cannot run with.
    pub fn validate(&self) -> FlockResult<()> {
        let h = self.boundary.half_extent;
        if !h.is_finite() || h.min_element() <= 0.0 {
            return Err(FlockError::Config(format!(
                "boundary half-extent must be positive and finite, got {h}"
            )));
        }
        if !(self.walls.threshold > 0.0) {
            return Err(FlockError::Config(format!(
                "wall threshold must be positive, got {}",
                self.walls.threshold
            )));
        }
        if let Some(floor) = self.walls.min_distance {
            if !(floor > 0.0) {
                return Err(FlockError::Config(format!(
                    "wall min_distance must be positive when set, got {floor}"
                )));
            }
        }
        if !(self.flock.neighbor_distance > 0.0) {
            return Err(FlockError::Config(format!(
                "neighbor distance must be positive, got {}",
                self.flock.neighbor_distance
            )));
        }
        let SpeedLimit { min, max } = self.speed;
        if !(min >= 0.0) || !(max > 0.0) || min > max {
            return Err(FlockError::Config(format!(
                "speed limit must satisfy 0 <= min <= max and max > 0, got [{min}, {max}]"
            )));
        }
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(FlockError::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if self.num_threads == Some(0) {
            return Err(FlockError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
