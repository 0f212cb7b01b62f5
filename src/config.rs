//! Generation and analysis parameters.

use serde::{Deserialize, Serialize};

/// How the angle of a midpoint node is recovered from its Cartesian position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MidpointAngle {
    /// Four-quadrant arctangent, normalized to `[0, 2π)`.
    #[default]
    Quadrant,
    /// Single-argument arctangent of `y / x`.
    ///
    /// Only correct for midpoints with `x > 0`; kept to reproduce graphs
    /// produced by earlier versions of the model. Angles fall in
    /// `(-π/2, π/2]` rather than `[0, 2π)`. A midpoint at the origin gets
    /// angle 0.
    Legacy,
}

/// Strategy used to find the k closest earlier nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NeighborSearch {
    /// Expanding radius queries on the R-tree. Same result as `Exhaustive`.
    #[default]
    Indexed,
    /// Evaluate the distance to every earlier node.
    Exhaustive,
}

/// Configuration for network generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Number of nodes to place (midpoints come on top).
    pub node_count: u32,
    /// Connections at or beyond this weighted distance are subdivided.
    pub limit: f64,
    /// Neighbors selected per placed node (default: 3).
    pub k: usize,
    /// Radius of the embedding disk (default: 10.0).
    pub disk_radius: f64,
    pub midpoint_angle: MidpointAngle,
    pub neighbor_search: NeighborSearch,
}

impl GeneratorConfig {
    /// Defaults with the given node count and distance threshold.
    pub fn new(node_count: u32, limit: f64) -> Self {
        Self {
            node_count,
            limit,
            ..Self::default()
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            limit: 1.0,
            k: 3,
            disk_radius: 10.0,
            midpoint_angle: MidpointAngle::default(),
            neighbor_search: NeighborSearch::default(),
        }
    }
}

/// Configuration for the rich-club coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RichClubConfig {
    /// Double-edge swaps per edge when randomizing the reference graph (default: 500).
    pub q: u64,
    /// Divide by the coefficient of a degree-preserving random reference (default: true).
    pub normalized: bool,
}

impl Default for RichClubConfig {
    fn default() -> Self {
        Self {
            q: 500,
            normalized: true,
        }
    }
}
