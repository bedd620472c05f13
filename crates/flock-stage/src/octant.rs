//! Sign-octant classification and counting.

use std::fmt;
use std::ops::Index;

use glam::Vec3;

/// One of the eight regions cut out by the coordinate planes.
///
/// Discriminants are the display order of the counters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Octant {
    /// (−x, −y, −z)
    LeftDownBack     = 0,
    /// (+x, −y, −z)
    RightDownBack    = 1,
    /// (−x, +y, −z)
    LeftTopBack      = 2,
    /// (−x, −y, +z)
    LeftDownForward  = 3,
    /// (+x, +y, −z)
    RightTopBack     = 4,
    /// (+x, −y, +z)
    RightDownForward = 5,
    /// (−x, +y, +z)
    LeftTopForward   = 6,
    /// (+x, +y, +z)
    RightTopForward  = 7,
}

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant::LeftDownBack,
        Octant::RightDownBack,
        Octant::LeftTopBack,
        Octant::LeftDownForward,
        Octant::RightTopBack,
        Octant::RightDownForward,
        Octant::LeftTopForward,
        Octant::RightTopForward,
    ];

    /// Octant strictly containing `p`.
    ///
    /// `None` when any coordinate is exactly zero (the point lies on a
    /// dividing plane) or NaN.  Such agents are not counted anywhere, so
    /// [`OctantCounts::total`] can be smaller than the population.
    pub fn classify(p: Vec3) -> Option<Octant> {
        let sign = |v: f32| {
            if v > 0.0 {
                Some(true)
            } else if v < 0.0 {
                Some(false)
            } else {
                None
            }
        };
        let octant = match (sign(p.x)?, sign(p.y)?, sign(p.z)?) {
            (false, false, false) => Octant::LeftDownBack,
            (true,  false, false) => Octant::RightDownBack,
            (false, true,  false) => Octant::LeftTopBack,
            (false, false, true)  => Octant::LeftDownForward,
            (true,  true,  false) => Octant::RightTopBack,
            (true,  false, true)  => Octant::RightDownForward,
            (false, true,  true)  => Octant::LeftTopForward,
            (true,  true,  true)  => Octant::RightTopForward,
        };
        Some(octant)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Octant::LeftDownBack     => "left-down-back",
            Octant::RightDownBack    => "right-down-back",
            Octant::LeftTopBack      => "left-top-back",
            Octant::LeftDownForward  => "left-down-forward",
            Octant::RightTopBack     => "right-top-back",
            Octant::RightDownForward => "right-down-forward",
            Octant::LeftTopForward   => "left-top-forward",
            Octant::RightTopForward  => "right-top-forward",
        }
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── OctantCounts ──────────────────────────────────────────────────────────────

/// Number of agents in each octant, in [`Octant::ALL`] order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OctantCounts([u32; 8]);

impl OctantCounts {
    #[inline]
    pub fn from_array(counts: [u32; 8]) -> Self {
        Self(counts)
    }

    #[inline]
    pub fn as_array(&self) -> &[u32; 8] {
        &self.0
    }

    #[inline]
    pub fn get(&self, octant: Octant) -> u32 {
        self.0[octant.index()]
    }

    /// Sum of all eight counters.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| c as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Octant, u32)> + '_ {
        Octant::ALL.iter().map(|&o| (o, self.0[o.index()]))
    }

    /// Count `p` if it lies strictly inside an octant.
    #[inline]
    pub fn record(&mut self, p: Vec3) {
        if let Some(octant) = Octant::classify(p) {
            self.0[octant.index()] += 1;
        }
    }

    /// Element-wise sum, used to combine partial counts.
    #[inline]
    pub fn merge(mut self, other: OctantCounts) -> OctantCounts {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a += b;
        }
        self
    }
}

impl Index<Octant> for OctantCounts {
    type Output = u32;
    fn index(&self, octant: Octant) -> &u32 {
        &self.0[octant.index()]
    }
}

impl fmt::Display for OctantCounts {
    /// One `block-<label>: <count>` line per octant.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (octant, count)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "block-{octant}: {count}")?;
        }
        Ok(())
    }
}

/// Classify every position and return fresh counts.
pub fn count_octants(position: &[Vec3]) -> OctantCounts {
    #[cfg(not(feature = "parallel"))]
    {
        position.iter().fold(OctantCounts::default(), |mut counts, &p| {
            counts.record(p);
            counts
        })
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        position
            .par_iter()
            .fold(OctantCounts::default, |mut counts, &p| {
                counts.record(p);
                counts
            })
            .reduce(OctantCounts::default, OctantCounts::merge)
    }
}
