//! Node identifiers and coordinates.
//!
//! Every node in a [`DiskGraph`](super::DiskGraph) carries:
//! - A dense identifier, allocated in creation order
//! - A fixed polar coordinate (radius, angle), set once at creation

use std::f64::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense node identifier.
///
/// Ids are handed out as 0, 1, 2, ... and double as the index into the
/// graph's coordinate arena. It wraps a u32 for WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The id as an arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Polar coordinate of a node in the embedding disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarCoord {
    /// Distance from the disk centre.
    pub radius: f64,
    /// Angle in radians.
    pub angle: f64,
}

impl PolarCoord {
    /// Create a coordinate from a radius and an angle.
    #[inline]
    pub fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }

    /// Convert a Cartesian point to polar form.
    ///
    /// The angle uses the four-quadrant arctangent, normalized to `[0, 2π)`.
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        let angle = y.atan2(x).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        let angle = if angle >= TAU { 0.0 } else { angle };
        Self {
            radius: x.hypot(y),
            angle,
        }
    }

    /// Convert to Cartesian `(x, y)`.
    #[inline]
    pub fn to_cartesian(self) -> (f64, f64) {
        (self.radius * self.angle.cos(), self.radius * self.angle.sin())
    }
}
