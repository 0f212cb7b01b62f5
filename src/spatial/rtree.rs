//! R*-tree over node positions, backed by the rstar crate.
//!
//! Only finite positions are indexed. A node with a non-finite coordinate
//! (for example from an infinite disk radius) stays out of the tree and is
//! only reachable through exhaustive search.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::{DiskGraph, NodeId};

/// A node position stored in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedNode {
    id: NodeId,
    at: [f64; 2],
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.at)
    }
}

impl PointDistance for IndexedNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.at[0] - point[0];
        let dy = self.at[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the Cartesian positions of a [`DiskGraph`].
///
/// Nodes are inserted once and never move.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    tree: RTree<IndexedNode>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk load from `(id, x, y)` tuples. Non-finite points are skipped.
    pub fn from_points(points: &[(NodeId, f64, f64)]) -> Self {
        let nodes = points
            .iter()
            .filter(|(_, x, y)| x.is_finite() && y.is_finite())
            .map(|&(id, x, y)| IndexedNode { id, at: [x, y] })
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Bulk load every node of `graph`.
    pub fn from_graph(graph: &DiskGraph) -> Self {
        let points: Vec<_> = graph
            .node_ids()
            .zip(graph.positions_x().iter().zip(graph.positions_y()))
            .map(|(id, (&x, &y))| (id, x, y))
            .collect();
        Self::from_points(&points)
    }

    /// Index a point. Returns false (and indexes nothing) for non-finite input.
    pub fn insert(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        self.tree.insert(IndexedNode { id, at: [x, y] });
        true
    }

    /// Index a node of `graph` at its current position.
    pub fn insert_node(&mut self, graph: &DiskGraph, id: NodeId) -> bool {
        match graph.position(id) {
            Some((x, y)) => self.insert(id, x, y),
            None => false,
        }
    }

    /// The indexed node closest to `(x, y)`.
    pub fn nearest(&self, x: f64, y: f64) -> Option<NodeId> {
        self.tree.nearest_neighbor(&[x, y]).map(|node| node.id)
    }

    /// All indexed nodes within `radius` of `(x, y)`, boundary included.
    pub fn in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<NodeId> {
        self.tree
            .locate_within_distance([x, y], radius * radius)
            .map(|node| node.id)
            .collect()
    }

    /// Like [`in_radius`](Self::in_radius), restricted to ids below `before`.
    pub fn earlier_in_radius(&self, x: f64, y: f64, radius: f64, before: NodeId) -> Vec<NodeId> {
        self.tree
            .locate_within_distance([x, y], radius * radius)
            .filter(|node| node.id < before)
            .map(|node| node.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
