//! Degree-weighted distance.
//!
//! The distance from `a` to `b` is the Euclidean distance between their
//! Cartesian positions divided by `sqrt(degree(b))` when `b` has edges. The
//! metric is asymmetric: `b` must be the established node, so that
//! well-connected nodes look closer and keep attracting new connections.

use crate::graph::{DiskGraph, NodeId};

/// Euclidean distance between two nodes.
///
/// # Panics
///
/// Panics if either node does not exist.
#[inline]
pub fn euclidean(graph: &DiskGraph, a: NodeId, b: NodeId) -> f64 {
    let xs = graph.positions_x();
    let ys = graph.positions_y();
    let dx = xs[b.index()] - xs[a.index()];
    let dy = ys[b.index()] - ys[a.index()];
    (dx * dx + dy * dy).sqrt()
}

/// Degree-weighted distance from `a` to the established node `b`.
///
/// # Panics
///
/// Panics if either node does not exist.
#[inline]
pub fn distance(graph: &DiskGraph, a: NodeId, b: NodeId) -> f64 {
    let raw = euclidean(graph, a, b);
    match graph.degree(b) {
        0 => raw,
        degree => raw / (degree as f64).sqrt(),
    }
}
